//! Location Model

use serde::{Deserialize, Serialize};

/// Location configuration relevant to pricing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: String,
    /// Owning brand reference
    pub brand_id: String,
    pub name: String,
    /// Delivery fee for orders from this location
    #[serde(default)]
    pub delivery_fee: f64,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        brand_id: impl Into<String>,
        name: impl Into<String>,
        delivery_fee: f64,
    ) -> Self {
        Self {
            id: id.into(),
            brand_id: brand_id.into(),
            name: name.into(),
            delivery_fee,
        }
    }
}
