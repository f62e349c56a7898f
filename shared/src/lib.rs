//! Shared types for the Morsel ordering platform
//!
//! Data model consumed by the cart pricing engine and its collaborators:
//! brand/location configuration, discount and upsell records, and the
//! cart value object with its derived totals.

pub mod cart;
pub mod models;

// Re-exports
pub use cart::{CartItem, CartState, CartTotals, DeliveryType, PaymentDetails};
pub use models::{Brand, Location, StandardDiscount, Upsell, Voucher};
pub use serde::{Deserialize, Serialize};
