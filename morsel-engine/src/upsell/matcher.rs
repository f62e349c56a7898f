//! Upsell Trigger Matcher
//!
//! Stateless matching pass over a cart snapshot at checkout intent.
//! Candidates arrive already scoped to the active brand + location and
//! are evaluated in input order; the first campaign that is active,
//! triggered, and still has something to offer wins.

use chrono::NaiveDateTime;
use shared::cart::CartState;
use shared::models::{OfferDiscount, Product, TriggerCondition, Upsell, UpsellOfferSpec};

use super::schedule::is_schedule_active;

/// A matched campaign with its offerable products
#[derive(Debug, Clone, PartialEq)]
pub struct UpsellMatch {
    pub upsell_id: String,
    pub name: String,
    /// Discount on the offered item, if the campaign carries one
    pub discount: Option<OfferDiscount>,
    /// Resolved offer, with products already in the cart removed
    pub products: Vec<Product>,
}

/// Find the first campaign in input order that is active, triggered by
/// the cart, and still has at least one product to offer. `None` means
/// checkout proceeds directly.
pub fn match_upsell(
    state: &CartState,
    cart_total: f64,
    upsells: &[Upsell],
    catalog: &[Product],
    now: NaiveDateTime,
) -> Option<UpsellMatch> {
    upsells
        .iter()
        .filter(|upsell| upsell.is_active)
        .filter(|upsell| is_schedule_active(upsell, now))
        .filter(|upsell| is_triggered(upsell, state, cart_total))
        .find_map(|upsell| {
            let products = offerable_products(&upsell.offer, catalog, state);
            (!products.is_empty()).then(|| UpsellMatch {
                upsell_id: upsell.id.clone(),
                name: upsell.name.clone(),
                discount: upsell.discount,
                products,
            })
        })
}

/// OR semantics: any single matching condition triggers the campaign
fn is_triggered(upsell: &Upsell, state: &CartState, cart_total: f64) -> bool {
    upsell.trigger_conditions.iter().any(|condition| match condition {
        TriggerCondition::ProductInCart { reference_id } => state.contains_product(reference_id),
        TriggerCondition::CategoryInCart { reference_id } => state.contains_category(reference_id),
        TriggerCondition::CartValueOver { threshold } => cart_total > *threshold,
    })
}

/// Resolve the offer to concrete products, then drop anything already in
/// the cart: never upsell something the customer already has.
fn offerable_products(
    offer: &UpsellOfferSpec,
    catalog: &[Product],
    state: &CartState,
) -> Vec<Product> {
    let candidates = catalog.iter().filter(|product| match offer {
        UpsellOfferSpec::Product { product_ids } => product_ids.contains(&product.id),
        UpsellOfferSpec::Category { category_ids } => product
            .category_id
            .as_ref()
            .is_some_and(|category| category_ids.contains(category)),
    });

    candidates
        .filter(|product| !state.contains_product(&product.id))
        .cloned()
        .collect()
}
