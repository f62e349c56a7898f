//! Fee & VAT Calculator
//!
//! Applies delivery, bag and admin fees to the discounted cart total and
//! derives VAT as an inclusive component of the final amount. Displayed
//! prices already include VAT; the VAT line is informational only.

use rust_decimal::prelude::*;
use shared::cart::DeliveryType;
use shared::models::{AdminFeeType, Brand, Location};

use crate::money::to_decimal;

/// VAT rate assumed when a brand leaves `vat_percentage` unset
pub const DEFAULT_VAT_RATE: f64 = 25.0;

/// Inputs for one fee pass
#[derive(Debug, Clone, Copy)]
pub struct FeeInputs<'a> {
    pub brand: &'a Brand,
    pub location: &'a Location,
    pub delivery_type: DeliveryType,
    pub include_bag_fee: bool,
    pub free_delivery_applied: bool,
}

/// Fee breakdown (unrounded; the aggregator rounds on write-out)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeBreakdown {
    /// Delivery fee actually charged
    pub delivery_fee: Decimal,
    /// Delivery fee waived by a free-delivery discount
    pub waived_delivery_fee: Decimal,
    pub bag_fee: Decimal,
    pub admin_fee: Decimal,
    pub checkout_total: Decimal,
    pub vat_amount: Decimal,
}

/// Non-finite or negative configured fee values are treated as absent
fn fee_value(value: f64) -> Decimal {
    if !value.is_finite() || value < 0.0 {
        return Decimal::ZERO;
    }
    to_decimal(value)
}

/// Apply fees on top of the discounted cart total
pub fn calculate_fees(cart_total: Decimal, inputs: &FeeInputs<'_>) -> FeeBreakdown {
    let cart_total = cart_total.max(Decimal::ZERO);

    // Delivery fee only applies to delivery orders
    let base_delivery_fee = match inputs.delivery_type {
        DeliveryType::Delivery => fee_value(inputs.location.delivery_fee),
        DeliveryType::Pickup => Decimal::ZERO,
    };
    let (delivery_fee, waived_delivery_fee) = if inputs.free_delivery_applied {
        (Decimal::ZERO, base_delivery_fee)
    } else {
        (base_delivery_fee, Decimal::ZERO)
    };

    let bag_fee = if inputs.include_bag_fee {
        inputs.brand.bag_fee.map(fee_value).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    // Admin fee is computed on the discounted cart total, not the
    // checkout total (no circularity)
    let admin_fee = match inputs.brand.admin_fee {
        Some(fee) => match inputs.brand.admin_fee_type {
            AdminFeeType::Fixed => fee_value(fee),
            AdminFeeType::Percentage => cart_total * fee_value(fee) / Decimal::ONE_HUNDRED,
        },
        None => Decimal::ZERO,
    };

    let checkout_total = (cart_total + delivery_fee + bag_fee + admin_fee).max(Decimal::ZERO);
    let vat_amount = vat_component(checkout_total, inputs.brand.vat_percentage);

    FeeBreakdown {
        delivery_fee,
        waived_delivery_fee,
        bag_fee,
        admin_fee,
        checkout_total,
        vat_amount,
    }
}

/// VAT-inclusive back-calculation: `total * rate / (100 + rate)`
pub fn vat_component(checkout_total: Decimal, vat_percentage: Option<f64>) -> Decimal {
    let rate = match vat_percentage {
        Some(rate) if rate.is_finite() && rate > 0.0 => to_decimal(rate),
        Some(_) => return Decimal::ZERO,
        None => to_decimal(DEFAULT_VAT_RATE),
    };
    checkout_total * rate / (Decimal::ONE_HUNDRED + rate)
}
