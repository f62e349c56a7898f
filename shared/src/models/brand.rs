//! Brand Model

use serde::{Deserialize, Serialize};

/// Admin fee type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminFeeType {
    /// Flat amount per order
    #[default]
    Fixed,
    /// Percentage of the discounted cart total
    Percentage,
}

/// Brand configuration relevant to pricing (one record per tenant brand)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    pub id: String,
    pub name: String,
    /// Per-order bag fee; None when the brand charges none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bag_fee: Option<f64>,
    /// Admin fee value (amount or percentage depending on `admin_fee_type`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_fee: Option<f64>,
    #[serde(default)]
    pub admin_fee_type: AdminFeeType,
    /// VAT rate in percentage (e.g., 25 = 25%); prices are VAT-inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_percentage: Option<f64>,
}

impl Brand {
    /// Create a brand with no fees configured
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bag_fee: None,
            admin_fee: None,
            admin_fee_type: AdminFeeType::Fixed,
            vat_percentage: None,
        }
    }
}
