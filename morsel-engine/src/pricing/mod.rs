//! Cart pricing
//!
//! Discount selection, fee & VAT calculation, and the totals recompute
//! pass that ties them together.

pub mod fees;
pub mod selector;
pub mod totals;

pub use fees::{calculate_fees, vat_component, FeeBreakdown, FeeInputs, DEFAULT_VAT_RATE};
pub use selector::{
    discountable_subtotal, qualifying_free_delivery, select_cart_discount, CartLevelSelection,
    LockedItemPolicy, NoLockedItems,
};
pub use totals::{recompute, PricingContext};
