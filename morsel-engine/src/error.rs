//! Error types for the pricing engine
//!
//! Malformed discount/upsell records never raise; they are filtered out
//! during selection. These errors cover the remaining failure surfaces:
//! invalid caller input at the cart boundary, counter-store contention,
//! and discount-source fetch failures (which callers treat as fail-open).

use thiserror::Error;

/// Cart input validation errors
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    #[error("{field} must be a finite number, got {value}")]
    NonFiniteAmount { field: &'static str, value: f64 },
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("{field} exceeds maximum allowed ({max}), got {value}")]
    AmountTooLarge {
        field: &'static str,
        max: f64,
        value: f64,
    },
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i32),
    #[error("quantity exceeds maximum allowed ({max}), got {value}")]
    QuantityTooLarge { max: i32, value: i32 },
}

/// Counter-store errors
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// The compare-and-swap loop gave up after repeated version conflicts
    #[error("counter update for upsell {0} lost {1} consecutive version races")]
    Contention(String, usize),
}

/// Discount-source fetch errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("discount fetch failed: {0}")]
    Fetch(String),
}
