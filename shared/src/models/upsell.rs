//! Upsell Campaign Model
//!
//! A targeted additional-purchase offer shown at checkout intent, gated by
//! trigger conditions and an activity schedule. Campaigns are authored in
//! the back office and arrive here read-only, already scoped to the active
//! brand + location.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::discount::DiscountMethod;

/// Trigger condition: any single matching condition triggers the campaign
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerCondition {
    /// Exact product id present in the cart
    ProductInCart { reference_id: String },
    /// Exact category id present in the cart
    CategoryInCart { reference_id: String },
    /// Cart total strictly greater than the threshold
    CartValueOver { threshold: f64 },
}

/// What the campaign offers once triggered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "offer_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpsellOfferSpec {
    /// Explicit product list
    Product { product_ids: Vec<String> },
    /// All products in the named categories
    Category { category_ids: Vec<String> },
}

/// Discount applied to the offered item on acceptance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OfferDiscount {
    pub method: DiscountMethod,
    pub value: f64,
}

/// Active time-of-day window (HH:MM format; end < start wraps past midnight)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

/// Upsell campaign entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Upsell {
    pub id: String,
    pub name: String,
    pub brand_id: String,
    pub location_id: String,
    pub trigger_conditions: Vec<TriggerCondition>,
    pub offer: UpsellOfferSpec,
    /// Discount on the offered item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<OfferDiscount>,
    /// Active days of week (0=Sunday..6=Saturday); empty = every day
    #[serde(default)]
    pub active_days: Vec<u8>,
    /// Active time-of-day windows; empty = all day
    #[serde(default)]
    pub active_time_slots: Vec<TimeSlot>,
    /// Campaign window start (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Campaign window end (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
}
