//! Discount Models
//!
//! Automatic (standard) discounts are brand/location-scoped rules fetched
//! per delivery-type context; vouchers are customer-entered codes. Both are
//! read-only inputs to the pricing engine.

use serde::{Deserialize, Serialize};

/// Discount method enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountMethod {
    Percentage,
    FixedAmount,
}

/// Automatic discount rule, applied without user action.
///
/// Records with a discount type this engine does not price deserialize to
/// `Other` and never qualify.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "discount_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StandardDiscount {
    /// Cart-level discount on the discountable subtotal
    Cart(CartDiscountRule),
    /// Waives the delivery fee above a minimum order value
    FreeDelivery(FreeDeliveryRule),
    /// Unrecognized discount type
    #[serde(other)]
    Other,
}

impl StandardDiscount {
    pub fn as_cart(&self) -> Option<&CartDiscountRule> {
        match self {
            Self::Cart(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_free_delivery(&self) -> Option<&FreeDeliveryRule> {
        match self {
            Self::FreeDelivery(rule) => Some(rule),
            _ => None,
        }
    }
}

/// Cart-level automatic discount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartDiscountRule {
    pub name: String,
    pub method: DiscountMethod,
    /// Discount value (percentage: 10 = 10%, fixed: 10.00 = €10)
    pub value: f64,
    /// Minimum discountable subtotal for the rule to qualify
    #[serde(default)]
    pub min_order_value: f64,
    /// Promotionally surfaced in the menu's offers category
    #[serde(default)]
    pub assign_to_offer_category: bool,
}

/// Free-delivery automatic discount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreeDeliveryRule {
    pub name: String,
    #[serde(default)]
    pub min_order_value: f64,
}

/// Customer-entered voucher code; at most one applied per cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voucher {
    pub code: String,
    pub method: DiscountMethod,
    pub value: f64,
    #[serde(default)]
    pub min_order_value: f64,
}
