//! Cart-Level Discount Selector
//!
//! Picks at most one winning cart-level discount from the active automatic
//! rules and an optionally applied voucher. Discounts never combine at the
//! cart level; free delivery is evaluated independently of that choice.

use rust_decimal::prelude::*;
use shared::cart::{AppliedDiscount, CartItem};
use shared::models::{
    CartDiscountRule, DiscountMethod, FreeDeliveryRule, StandardDiscount, Voucher,
};

use crate::money::{to_decimal, to_f64, DECIMAL_PLACES};

/// Excludes items already locked to a promotional price from cart-level
/// discount stacking. The predicate is owned by the caller; the engine
/// only consults it.
pub trait LockedItemPolicy: Send + Sync {
    fn is_locked(&self, item: &CartItem) -> bool;
}

impl<F> LockedItemPolicy for F
where
    F: Fn(&CartItem) -> bool + Send + Sync,
{
    fn is_locked(&self, item: &CartItem) -> bool {
        self(item)
    }
}

/// Default policy: no line is excluded
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLockedItems;

impl LockedItemPolicy for NoLockedItems {
    fn is_locked(&self, _item: &CartItem) -> bool {
        false
    }
}

/// Sum of `(base_price + toppings) * quantity` over unlocked items.
/// Cart-level discounts are evaluated against this pre-item-discount
/// baseline, not the already-discounted line prices.
pub fn discountable_subtotal(items: &[CartItem], policy: &dyn LockedItemPolicy) -> Decimal {
    items
        .iter()
        .filter(|item| !policy.is_locked(item))
        .map(|item| {
            let toppings: Decimal = item.toppings.iter().map(|t| to_decimal(t.price)).sum();
            (to_decimal(item.base_price) + toppings) * Decimal::from(item.quantity)
        })
        .sum()
}

/// Winning cart-level discount; at most one side is ever set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartLevelSelection {
    pub cart_discount: Option<AppliedDiscount>,
    pub voucher_discount: Option<AppliedDiscount>,
}

/// Compute a discount amount against a basis. Fixed amounts cap at the
/// basis so downstream subtraction can never go negative.
fn discount_amount(method: DiscountMethod, value: f64, basis: Decimal) -> Decimal {
    let value = to_decimal(value);
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let amount = match method {
        DiscountMethod::Percentage => basis * value / Decimal::ONE_HUNDRED,
        DiscountMethod::FixedAmount => value.min(basis),
    };
    amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Best qualifying automatic cart discount by computed amount.
/// First encountered wins ties (stable input order).
fn best_automatic<'a>(
    discounts: &'a [StandardDiscount],
    discountable: Decimal,
) -> Option<(&'a CartDiscountRule, Decimal)> {
    if discountable <= Decimal::ZERO {
        return None;
    }
    let mut best: Option<(&CartDiscountRule, Decimal)> = None;
    for rule in discounts.iter().filter_map(StandardDiscount::as_cart) {
        // Malformed rules do not qualify
        if !rule.value.is_finite() || rule.value <= 0.0 {
            continue;
        }
        if discountable < to_decimal(rule.min_order_value) {
            continue;
        }
        let amount = discount_amount(rule.method, rule.value, discountable);
        if amount <= Decimal::ZERO {
            continue;
        }
        match &best {
            Some((_, best_amount)) if amount <= *best_amount => {}
            _ => best = Some((rule, amount)),
        }
    }
    best
}

fn voucher_amount(voucher: &Voucher, discountable: Decimal) -> Option<Decimal> {
    if discountable <= Decimal::ZERO {
        return None;
    }
    if !voucher.value.is_finite() || voucher.value <= 0.0 {
        return None;
    }
    if discountable < to_decimal(voucher.min_order_value) {
        return None;
    }
    let amount = discount_amount(voucher.method, voucher.value, discountable);
    (amount > Decimal::ZERO).then_some(amount)
}

/// Winner-take-all between the best automatic discount and the voucher:
/// the voucher must beat the automatic strictly; ties go to the automatic.
/// The losing voucher stays applied on the cart but contributes nothing.
pub fn select_cart_discount(
    discounts: &[StandardDiscount],
    voucher: Option<&Voucher>,
    discountable: Decimal,
) -> CartLevelSelection {
    let best_auto = best_automatic(discounts, discountable);
    let voucher_win = voucher.and_then(|v| {
        voucher_amount(v, discountable).map(|amount| AppliedDiscount {
            name: v.code.clone(),
            amount: to_f64(amount),
        })
    });

    match (best_auto, voucher_win) {
        (Some((rule, auto_amount)), Some(voucher_discount))
            if to_decimal(voucher_discount.amount) <= auto_amount =>
        {
            CartLevelSelection {
                cart_discount: Some(AppliedDiscount {
                    name: rule.name.clone(),
                    amount: to_f64(auto_amount),
                }),
                voucher_discount: None,
            }
        }
        (_, Some(voucher_discount)) => CartLevelSelection {
            cart_discount: None,
            voucher_discount: Some(voucher_discount),
        },
        (Some((rule, auto_amount)), None) => CartLevelSelection {
            cart_discount: Some(AppliedDiscount {
                name: rule.name.clone(),
                amount: to_f64(auto_amount),
            }),
            voucher_discount: None,
        },
        (None, None) => CartLevelSelection::default(),
    }
}

/// First free-delivery rule whose minimum is met by the effective goods
/// total (subtotal minus item discounts). Independent of which cart-level
/// discount won.
pub fn qualifying_free_delivery<'a>(
    discounts: &'a [StandardDiscount],
    effective_subtotal: Decimal,
) -> Option<&'a FreeDeliveryRule> {
    if effective_subtotal <= Decimal::ZERO {
        return None;
    }
    discounts
        .iter()
        .filter_map(StandardDiscount::as_free_delivery)
        .find(|rule| effective_subtotal >= to_decimal(rule.min_order_value))
}
