//! Cart Totals
//!
//! Output of the pricing recompute pass. `subtotal` is the pre-discount
//! baseline (base prices + toppings); discounts and fees are broken out so
//! downstream views can display them verbatim without recomputation.

use serde::{Deserialize, Serialize};

/// A named discount with its computed amount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedDiscount {
    pub name: String,
    pub amount: f64,
}

/// Derived totals for the active cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CartTotals {
    /// Sum of (base_price + toppings) * quantity over all lines
    pub subtotal: f64,
    /// Sum of per-line item-level discounts
    pub item_discount: f64,
    /// Winning automatic cart-level discount; never set together with
    /// `voucher_discount`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_discount: Option<AppliedDiscount>,
    /// Winning voucher discount; never set together with `cart_discount`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_discount: Option<AppliedDiscount>,
    pub free_delivery_applied: bool,
    /// Delivery fee actually charged (0 on pickup or free delivery)
    pub delivery_fee: f64,
    pub bag_fee: f64,
    pub admin_fee: f64,
    /// Total after item + cart-level discounts, before fees
    pub cart_total: f64,
    /// Final amount to pay
    pub checkout_total: f64,
    /// VAT component of the checkout total (prices are VAT-inclusive)
    pub vat_amount: f64,
    pub item_count: i32,
    /// All applied discount names joined with " + ", with their summed
    /// amount (item + cart-level + waived delivery fee)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_discount: Option<AppliedDiscount>,
}

impl CartTotals {
    /// Amount of whichever cart-level discount won (0 when none)
    pub fn cart_level_discount(&self) -> f64 {
        self.cart_discount
            .as_ref()
            .or(self.voucher_discount.as_ref())
            .map(|d| d.amount)
            .unwrap_or(0.0)
    }

    /// Payment breakdown embedded in the order-submission payload.
    /// Order-confirmation and admin order-detail views display this
    /// verbatim without recomputation.
    pub fn payment_details(&self) -> PaymentDetails {
        PaymentDetails {
            subtotal: self.subtotal,
            item_discount_total: self.item_discount,
            cart_discount_total: self.cart_level_discount(),
            delivery_fee: self.delivery_fee,
            bag_fee: self.bag_fee,
            admin_fee: self.admin_fee,
            vat_amount: self.vat_amount,
        }
    }
}

/// Payment breakdown for the order payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PaymentDetails {
    pub subtotal: f64,
    pub item_discount_total: f64,
    pub cart_discount_total: f64,
    pub delivery_fee: f64,
    pub bag_fee: f64,
    pub admin_fee: f64,
    pub vat_amount: f64,
}
