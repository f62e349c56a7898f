//! Money calculation utilities using rust_decimal for precision
//!
//! All pricing arithmetic is done in `Decimal` internally, then converted
//! to `f64` for the serialized totals. Caller inputs are validated at the
//! cart boundary; values that slip through non-finite are logged and
//! zeroed rather than corrupting a financial calculation.

use crate::error::CartError;
use rust_decimal::prelude::*;
use shared::cart::CartItem;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed price per item (€1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 9999;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field: &'static str) -> Result<(), CartError> {
    if !value.is_finite() {
        return Err(CartError::NonFiniteAmount { field, value });
    }
    Ok(())
}

fn require_price(value: f64, field: &'static str) -> Result<(), CartError> {
    require_finite(value, field)?;
    if value < 0.0 {
        return Err(CartError::NegativeAmount { field, value });
    }
    if value > MAX_PRICE {
        return Err(CartError::AmountTooLarge {
            field,
            max: MAX_PRICE,
            value,
        });
    }
    Ok(())
}

/// Validate a cart item before it enters the pricing pass
pub fn validate_item(item: &CartItem) -> Result<(), CartError> {
    require_price(item.base_price, "base_price")?;
    require_price(item.price, "price")?;

    if item.quantity <= 0 {
        return Err(CartError::InvalidQuantity(item.quantity));
    }
    if item.quantity > MAX_QUANTITY {
        return Err(CartError::QuantityTooLarge {
            max: MAX_QUANTITY,
            value: item.quantity,
        });
    }

    for topping in &item.toppings {
        require_price(topping.price, "topping price")?;
    }

    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `validate_item` at the
/// boundary. If NaN/Infinity somehow reaches here, logs an error and
/// returns ZERO to avoid silent data corruption.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with max input ≤ 1_000_000 (validated at boundary)
        // is always within f64 representable range (~1.8e308)
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
