//! Cart Item
//!
//! One line in the active cart. `price` is the effective unit price after
//! item-level discounts and never exceeds `base_price`; both are unit
//! prices before toppings. Lines are content-addressed: two adds of the
//! same product with the same toppings merge into one line.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Item variant tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    Product,
    Combo,
}

/// Topping added once per unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topping {
    pub name: String,
    pub price: f64,
}

/// Chosen sub-product within a combo group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComboSelection {
    pub group_name: String,
    pub product_id: String,
    pub product_name: String,
}

/// A line in the active cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Source product or combo id
    pub id: String,
    pub item_type: ItemKind,
    pub name: String,
    /// Undiscounted unit price (pre item-level discount)
    pub base_price: f64,
    /// Effective unit price after item-level discount
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub toppings: Vec<Topping>,
    /// Present only for combos
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo_selections: Option<Vec<ComboSelection>>,
    /// Category reference, used by discount/upsell matching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub brand_id: String,
}

impl CartItem {
    /// Create a product line. `price` is clamped to `base_price` so the
    /// invariant `price <= base_price` holds by construction.
    pub fn product(
        id: impl Into<String>,
        name: impl Into<String>,
        brand_id: impl Into<String>,
        base_price: f64,
        price: f64,
        quantity: i32,
    ) -> Self {
        Self {
            id: id.into(),
            item_type: ItemKind::Product,
            name: name.into(),
            base_price,
            price: price.min(base_price),
            quantity,
            toppings: Vec::new(),
            combo_selections: None,
            category_id: None,
            brand_id: brand_id.into(),
        }
    }

    /// Create a combo line with its chosen sub-products
    pub fn combo(
        id: impl Into<String>,
        name: impl Into<String>,
        brand_id: impl Into<String>,
        base_price: f64,
        price: f64,
        quantity: i32,
        selections: Vec<ComboSelection>,
    ) -> Self {
        Self {
            id: id.into(),
            item_type: ItemKind::Combo,
            name: name.into(),
            base_price,
            price: price.min(base_price),
            quantity,
            toppings: Vec::new(),
            combo_selections: Some(selections),
            category_id: None,
            brand_id: brand_id.into(),
        }
    }

    pub fn with_toppings(mut self, toppings: Vec<Topping>) -> Self {
        self.toppings = toppings;
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Content-addressed line signature: id + topping names/prices.
    /// Lines with equal signatures merge on add-to-cart.
    pub fn signature(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.id.as_bytes());
        for topping in &self.toppings {
            hasher.update(b"|");
            hasher.update(topping.name.as_bytes());
            hasher.update(topping.price.to_bits().to_le_bytes());
        }
        hex::encode(&hasher.finalize()[..16])
    }

    /// Sum of topping prices per unit
    pub fn toppings_total(&self) -> f64 {
        self.toppings.iter().map(|t| t.price).sum()
    }

    /// Effective per-unit price including toppings
    pub fn effective_unit_price(&self) -> f64 {
        self.price + self.toppings_total()
    }

    /// Undiscounted per-unit price including toppings
    pub fn base_unit_price(&self) -> f64 {
        self.base_price + self.toppings_total()
    }
}
