//! Cart State
//!
//! Explicit value object owned by a single session scope. Mutation actions
//! consume the state and return the new one; the engine recomputes totals
//! from the result. There is no shared global cart.

use serde::{Deserialize, Serialize};

use super::item::CartItem;
use crate::models::Voucher;

/// Delivery type enum; exactly one is active per cart session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryType {
    #[default]
    Delivery,
    Pickup,
}

/// The active cart for one customer session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    pub brand_id: String,
    pub location_id: String,
    pub delivery_type: DeliveryType,
    pub items: Vec<CartItem>,
    /// Applied voucher; explicit user action to apply/remove
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher: Option<Voucher>,
    /// Bag fee toggle; the brand's bag fee is charged unless opted out
    pub include_bag_fee: bool,
}

impl CartState {
    /// Create an empty cart for a brand/location
    pub fn new(brand_id: impl Into<String>, location_id: impl Into<String>) -> Self {
        Self {
            brand_id: brand_id.into(),
            location_id: location_id.into(),
            delivery_type: DeliveryType::Delivery,
            items: Vec::new(),
            voucher: None,
            include_bag_fee: true,
        }
    }

    /// Add an item, merging with an existing line when the id + toppings
    /// signature matches. Non-positive quantities are ignored.
    pub fn with_item_added(mut self, item: CartItem) -> Self {
        if item.quantity <= 0 {
            return self;
        }
        let signature = item.signature();
        if let Some(existing) = self.items.iter_mut().find(|i| i.signature() == signature) {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
        self
    }

    /// Remove the line with the given signature
    pub fn with_item_removed(mut self, signature: &str) -> Self {
        self.items.retain(|i| i.signature() != signature);
        self
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn with_quantity(mut self, signature: &str, quantity: i32) -> Self {
        if quantity <= 0 {
            return self.with_item_removed(signature);
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.signature() == signature) {
            item.quantity = quantity;
        }
        self
    }

    pub fn with_voucher(mut self, voucher: Voucher) -> Self {
        self.voucher = Some(voucher);
        self
    }

    pub fn without_voucher(mut self) -> Self {
        self.voucher = None;
        self
    }

    pub fn with_delivery_type(mut self, delivery_type: DeliveryType) -> Self {
        self.delivery_type = delivery_type;
        self
    }

    pub fn with_bag_fee(mut self, include: bool) -> Self {
        self.include_bag_fee = include;
        self
    }

    /// Empty the cart, keeping the store context (successful order placement)
    pub fn cleared(mut self) -> Self {
        self.items.clear();
        self.voucher = None;
        self
    }

    /// Switch brand/location; the cart and voucher do not carry over
    pub fn with_store(
        mut self,
        brand_id: impl Into<String>,
        location_id: impl Into<String>,
    ) -> Self {
        self.brand_id = brand_id.into();
        self.location_id = location_id.into();
        self.items.clear();
        self.voucher = None;
        self
    }

    /// Total unit count across all lines
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_product(&self, product_id: &str) -> bool {
        self.items.iter().any(|i| i.id == product_id)
    }

    pub fn contains_category(&self, category_id: &str) -> bool {
        self.items
            .iter()
            .any(|i| i.category_id.as_deref() == Some(category_id))
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscountMethod;

    fn make_item(id: &str, price: f64, quantity: i32) -> CartItem {
        CartItem::product(id, format!("Item {}", id), "b1", price, price, quantity)
    }

    #[test]
    fn test_add_merges_matching_lines() {
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 10.0, 1))
            .with_item_added(make_item("p1", 10.0, 2));

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].quantity, 3);
        assert_eq!(state.item_count(), 3);
    }

    #[test]
    fn test_add_keeps_distinct_lines_apart() {
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 10.0, 1))
            .with_item_added(make_item("p2", 5.0, 1));

        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let item = make_item("p1", 10.0, 2);
        let signature = item.signature();
        let state = CartState::new("b1", "l1")
            .with_item_added(item)
            .with_quantity(&signature, 0);

        assert!(state.is_empty());
    }

    #[test]
    fn test_store_switch_clears_cart_and_voucher() {
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 10.0, 1))
            .with_voucher(Voucher {
                code: "SAVE30".to_string(),
                method: DiscountMethod::FixedAmount,
                value: 30.0,
                min_order_value: 50.0,
            })
            .with_store("b2", "l2");

        assert!(state.is_empty());
        assert!(state.voucher.is_none());
        assert_eq!(state.brand_id, "b2");
    }

    #[test]
    fn test_cleared_keeps_store_context() {
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 10.0, 1))
            .cleared();

        assert!(state.is_empty());
        assert_eq!(state.brand_id, "b1");
        assert_eq!(state.location_id, "l1");
    }

    #[test]
    fn test_contains_lookups() {
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 10.0, 1).with_category("c1"));

        assert!(state.contains_product("p1"));
        assert!(!state.contains_product("p2"));
        assert!(state.contains_category("c1"));
        assert!(!state.contains_category("c2"));
    }
}
