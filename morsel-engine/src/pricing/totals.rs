//! Totals Aggregator
//!
//! The single recompute pass: subtotal and item discounts from the cart
//! lines, the winning cart-level discount, fees and VAT, and the combined
//! discount label. Pure function of its inputs: recomputing from the
//! same state yields bit-identical totals.

use rust_decimal::prelude::*;
use shared::cart::{AppliedDiscount, CartState, CartTotals};
use shared::models::{Brand, Location, StandardDiscount};

use super::fees::{calculate_fees, FeeInputs};
use super::selector::{
    discountable_subtotal, qualifying_free_delivery, select_cart_discount, LockedItemPolicy,
};
use crate::money::{to_decimal, to_f64};

/// Snapshot of the externally owned records feeding one recompute pass
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    pub brand: &'a Brand,
    pub location: &'a Location,
    /// Active discounts for the current brand/location/delivery type
    pub discounts: &'a [StandardDiscount],
}

/// Recompute all derived totals for the cart
pub fn recompute(
    state: &CartState,
    ctx: &PricingContext<'_>,
    policy: &dyn LockedItemPolicy,
) -> CartTotals {
    let mut subtotal = Decimal::ZERO;
    let mut item_discount = Decimal::ZERO;

    for item in &state.items {
        let quantity = Decimal::from(item.quantity);
        let toppings: Decimal = item.toppings.iter().map(|t| to_decimal(t.price)).sum();
        subtotal += (to_decimal(item.base_price) + toppings) * quantity;

        // price <= base_price holds by construction; the clamp guards
        // lines deserialized from older sessions
        let unit_discount =
            (to_decimal(item.base_price) - to_decimal(item.price)).max(Decimal::ZERO);
        item_discount += unit_discount * quantity;
    }

    let discountable = discountable_subtotal(&state.items, policy);
    let selection = select_cart_discount(ctx.discounts, state.voucher.as_ref(), discountable);
    let cart_level = selection
        .cart_discount
        .as_ref()
        .or(selection.voucher_discount.as_ref())
        .map(|d| to_decimal(d.amount))
        .unwrap_or(Decimal::ZERO);

    // Free delivery thresholds are checked against the effective goods
    // total, independently of the cart-level winner
    let effective_subtotal = subtotal - item_discount;
    let free_delivery = qualifying_free_delivery(ctx.discounts, effective_subtotal);

    let cart_total = (subtotal - item_discount - cart_level).max(Decimal::ZERO);
    let fees = calculate_fees(
        cart_total,
        &FeeInputs {
            brand: ctx.brand,
            location: ctx.location,
            delivery_type: state.delivery_type,
            include_bag_fee: state.include_bag_fee,
            free_delivery_applied: free_delivery.is_some(),
        },
    );

    // Combined discount line: named cart-level winners join the label;
    // item-level discounts have no names here but count in the amount
    let mut names: Vec<&str> = Vec::new();
    if let Some(applied) = selection.cart_discount.as_ref() {
        names.push(&applied.name);
    }
    if let Some(applied) = selection.voucher_discount.as_ref() {
        names.push(&applied.name);
    }
    if let Some(rule) = free_delivery {
        names.push(&rule.name);
    }
    let discount_sum = item_discount + cart_level + fees.waived_delivery_fee;
    let final_discount = (discount_sum > Decimal::ZERO).then(|| AppliedDiscount {
        name: names.join(" + "),
        amount: to_f64(discount_sum),
    });

    CartTotals {
        subtotal: to_f64(subtotal),
        item_discount: to_f64(item_discount),
        cart_discount: selection.cart_discount,
        voucher_discount: selection.voucher_discount,
        free_delivery_applied: free_delivery.is_some(),
        delivery_fee: to_f64(fees.delivery_fee),
        bag_fee: to_f64(fees.bag_fee),
        admin_fee: to_f64(fees.admin_fee),
        cart_total: to_f64(cart_total),
        checkout_total: to_f64(fees.checkout_total),
        vat_amount: to_f64(fees.vat_amount),
        item_count: state.item_count(),
        final_discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::NoLockedItems;
    use shared::cart::{CartItem, DeliveryType};
    use shared::models::{
        AdminFeeType, CartDiscountRule, DiscountMethod, FreeDeliveryRule, Voucher,
    };

    fn make_item(id: &str, base_price: f64, price: f64, quantity: i32) -> CartItem {
        CartItem::product(id, format!("Item {}", id), "b1", base_price, price, quantity)
    }

    fn make_cart_rule(name: &str, method: DiscountMethod, value: f64, min: f64) -> StandardDiscount {
        StandardDiscount::Cart(CartDiscountRule {
            name: name.to_string(),
            method,
            value,
            min_order_value: min,
            assign_to_offer_category: false,
        })
    }

    fn make_voucher(code: &str, value: f64, min: f64) -> Voucher {
        Voucher {
            code: code.to_string(),
            method: DiscountMethod::FixedAmount,
            value,
            min_order_value: min,
        }
    }

    #[test]
    fn test_worked_example_voucher_beats_automatic() {
        // Subtotal 200, automatic 10% (min 100) = 20, SAVE30 fixed 30
        // (min 50) -> voucher wins, cart total 170
        let brand = Brand::new("b1", "Testaurant");
        let location = Location::new("l1", "b1", "Downtown", 0.0);
        let discounts = vec![make_cart_rule(
            "Autumn deal",
            DiscountMethod::Percentage,
            10.0,
            100.0,
        )];
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 100.0, 100.0, 2))
            .with_voucher(make_voucher("SAVE30", 30.0, 50.0));

        let totals = recompute(
            &state,
            &PricingContext {
                brand: &brand,
                location: &location,
                discounts: &discounts,
            },
            &NoLockedItems,
        );

        assert_eq!(totals.subtotal, 200.0);
        assert!(totals.cart_discount.is_none());
        let voucher = totals.voucher_discount.as_ref().unwrap();
        assert_eq!(voucher.name, "SAVE30");
        assert_eq!(voucher.amount, 30.0);
        assert_eq!(totals.cart_total, 170.0);
        assert_eq!(totals.checkout_total, 170.0);
        let label = totals.final_discount.as_ref().unwrap();
        assert_eq!(label.name, "SAVE30");
        assert_eq!(label.amount, 30.0);
    }

    #[test]
    fn test_admin_fee_on_discounted_cart_total() {
        // Cart total 170 with a 5% admin fee -> 8.50 on top
        let mut brand = Brand::new("b1", "Testaurant");
        brand.admin_fee = Some(5.0);
        brand.admin_fee_type = AdminFeeType::Percentage;
        let location = Location::new("l1", "b1", "Downtown", 0.0);
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 100.0, 100.0, 2))
            .with_voucher(make_voucher("SAVE30", 30.0, 50.0));

        let totals = recompute(
            &state,
            &PricingContext {
                brand: &brand,
                location: &location,
                discounts: &[],
            },
            &NoLockedItems,
        );

        assert_eq!(totals.cart_total, 170.0);
        assert_eq!(totals.admin_fee, 8.5);
        assert_eq!(totals.checkout_total, 178.5);
    }

    #[test]
    fn test_empty_cart_yields_all_zeros() {
        let brand = Brand::new("b1", "Testaurant");
        let location = Location::new("l1", "b1", "Downtown", 4.9);
        let discounts = vec![make_cart_rule(
            "Always on",
            DiscountMethod::Percentage,
            10.0,
            0.0,
        )];
        let state = CartState::new("b1", "l1");

        let totals = recompute(
            &state,
            &PricingContext {
                brand: &brand,
                location: &location,
                discounts: &discounts,
            },
            &NoLockedItems,
        );

        assert_eq!(totals.subtotal, 0.0);
        assert!(totals.cart_discount.is_none());
        assert_eq!(totals.cart_total, 0.0);
        // Fees still apply per config; an empty cart charges delivery only
        // if one is configured, and the floor keeps everything >= 0
        assert!(totals.checkout_total >= 0.0);
        assert_eq!(totals.item_count, 0);
        assert!(totals.final_discount.is_none());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut brand = Brand::new("b1", "Testaurant");
        brand.bag_fee = Some(0.5);
        brand.admin_fee = Some(5.0);
        brand.admin_fee_type = AdminFeeType::Percentage;
        brand.vat_percentage = Some(21.0);
        let location = Location::new("l1", "b1", "Downtown", 4.9);
        let discounts = vec![
            make_cart_rule("Autumn deal", DiscountMethod::Percentage, 10.0, 50.0),
            StandardDiscount::FreeDelivery(FreeDeliveryRule {
                name: "Free delivery over 100".to_string(),
                min_order_value: 100.0,
            }),
        ];
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 60.0, 55.0, 2))
            .with_item_added(make_item("p2", 12.5, 12.5, 3))
            .with_voucher(make_voucher("SAVE30", 30.0, 50.0));
        let ctx = PricingContext {
            brand: &brand,
            location: &location,
            discounts: &discounts,
        };

        let first = recompute(&state, &ctx, &NoLockedItems);
        let second = recompute(&state, &ctx, &NoLockedItems);
        assert_eq!(first, second);
    }

    #[test]
    fn test_free_delivery_independent_of_cart_winner() {
        let brand = Brand::new("b1", "Testaurant");
        let location = Location::new("l1", "b1", "Downtown", 5.0);
        let discounts = vec![
            make_cart_rule("Autumn deal", DiscountMethod::Percentage, 10.0, 0.0),
            StandardDiscount::FreeDelivery(FreeDeliveryRule {
                name: "Free delivery over 100".to_string(),
                min_order_value: 100.0,
            }),
        ];
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 100.0, 100.0, 2));

        let totals = recompute(
            &state,
            &PricingContext {
                brand: &brand,
                location: &location,
                discounts: &discounts,
            },
            &NoLockedItems,
        );

        // The automatic cart discount won, and delivery is still free
        assert!(totals.cart_discount.is_some());
        assert!(totals.free_delivery_applied);
        assert_eq!(totals.delivery_fee, 0.0);
        // Label joins both names; amount includes the waived fee
        let label = totals.final_discount.as_ref().unwrap();
        assert_eq!(label.name, "Autumn deal + Free delivery over 100");
        assert_eq!(label.amount, 25.0);
    }

    #[test]
    fn test_item_discounts_count_into_final_discount_amount() {
        let brand = Brand::new("b1", "Testaurant");
        let location = Location::new("l1", "b1", "Downtown", 0.0);
        // base 60, effective 55: 5 of unnamed item-level discount per unit
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 60.0, 55.0, 2));

        let totals = recompute(
            &state,
            &PricingContext {
                brand: &brand,
                location: &location,
                discounts: &[],
            },
            &NoLockedItems,
        );

        assert_eq!(totals.subtotal, 120.0);
        assert_eq!(totals.item_discount, 10.0);
        assert_eq!(totals.cart_total, 110.0);
        let label = totals.final_discount.as_ref().unwrap();
        assert_eq!(label.name, "");
        assert_eq!(label.amount, 10.0);
    }

    #[test]
    fn test_locked_items_shrink_the_discountable_baseline() {
        let brand = Brand::new("b1", "Testaurant");
        let location = Location::new("l1", "b1", "Downtown", 0.0);
        // Fixed 40 would cap at the unlocked baseline (50), not the full
        // subtotal (150)
        let discounts = vec![make_cart_rule(
            "Forty off",
            DiscountMethod::FixedAmount,
            40.0,
            0.0,
        )];
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 50.0, 50.0, 1))
            .with_item_added(make_item("locked", 100.0, 100.0, 1));
        let policy = |item: &CartItem| item.id == "locked";

        let totals = recompute(
            &state,
            &PricingContext {
                brand: &brand,
                location: &location,
                discounts: &discounts,
            },
            &policy,
        );

        assert_eq!(totals.subtotal, 150.0);
        assert_eq!(totals.cart_discount.as_ref().unwrap().amount, 40.0);
        assert_eq!(totals.cart_total, 110.0);
    }

    #[test]
    fn test_checkout_total_never_negative() {
        let brand = Brand::new("b1", "Testaurant");
        let location = Location::new("l1", "b1", "Downtown", 0.0);
        let discounts = vec![make_cart_rule(
            "Too generous",
            DiscountMethod::FixedAmount,
            500.0,
            0.0,
        )];
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 20.0, 20.0, 1));

        let totals = recompute(
            &state,
            &PricingContext {
                brand: &brand,
                location: &location,
                discounts: &discounts,
            },
            &NoLockedItems,
        );

        assert_eq!(totals.cart_total, 0.0);
        assert_eq!(totals.checkout_total, 0.0);
    }

    #[test]
    fn test_pickup_with_delivery_type_change() {
        let brand = Brand::new("b1", "Testaurant");
        let location = Location::new("l1", "b1", "Downtown", 4.9);
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 20.0, 20.0, 1))
            .with_delivery_type(DeliveryType::Pickup);

        let totals = recompute(
            &state,
            &PricingContext {
                brand: &brand,
                location: &location,
                discounts: &[],
            },
            &NoLockedItems,
        );

        assert_eq!(totals.delivery_fee, 0.0);
        assert_eq!(totals.checkout_total, 20.0);
    }

    #[test]
    fn test_vat_back_calculated_from_checkout_total() {
        let mut brand = Brand::new("b1", "Testaurant");
        brand.vat_percentage = Some(25.0);
        let location = Location::new("l1", "b1", "Downtown", 0.0);
        let state = CartState::new("b1", "l1")
            .with_item_added(make_item("p1", 125.0, 125.0, 1));

        let totals = recompute(
            &state,
            &PricingContext {
                brand: &brand,
                location: &location,
                discounts: &[],
            },
            &NoLockedItems,
        );

        // 125 gross at 25% inclusive VAT carries 25 of VAT
        assert_eq!(totals.vat_amount, 25.0);
        assert_eq!(totals.checkout_total, 125.0);
    }
}
