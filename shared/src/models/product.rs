//! Product and Category Models
//!
//! Catalog provenance records, used by upsell offer resolution and
//! category-scoped trigger matching. The menu editor owns the full
//! entities; this engine only reads the fields below.

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Category reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub price: f64,
}

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
}
