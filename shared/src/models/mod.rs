//! Data models
//!
//! Records the pricing engine consumes but does not own: tenant
//! configuration, discount/upsell campaigns, and catalog provenance.
//! All of them arrive from the (externally owned) persistence layer
//! already scoped to the active brand/location/delivery-type context.

pub mod brand;
pub mod discount;
pub mod location;
pub mod product;
pub mod upsell;

// Re-exports
pub use brand::*;
pub use discount::*;
pub use location::*;
pub use product::*;
pub use upsell::*;
