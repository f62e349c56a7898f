//! Cart value object and derived totals
//!
//! The cart lives in one session scope and is mutated through explicit
//! actions that return the new state; totals are recomputed by the engine
//! from the state, never stored alongside it.

pub mod item;
pub mod state;
pub mod totals;

pub use item::{CartItem, ComboSelection, ItemKind, Topping};
pub use state::{CartState, DeliveryType};
pub use totals::{AppliedDiscount, CartTotals, PaymentDetails};
