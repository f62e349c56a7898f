//! Checkout Session
//!
//! Owns one customer's cart state, the last-fetched discount set, and the
//! current totals. Every mutation recomputes totals synchronously. The
//! discount fetch is re-issued whenever the delivery type or store
//! changes, is last-write-wins, and fails open: a failed refresh keeps
//! the previous rules (stale-but-valid) rather than blocking checkout.

use async_trait::async_trait;
use shared::cart::{CartItem, CartState, CartTotals, DeliveryType, PaymentDetails};
use shared::models::{Brand, Location, StandardDiscount, Voucher};

use crate::error::{CartError, SourceError};
use crate::money::validate_item;
use crate::pricing::{recompute, LockedItemPolicy, NoLockedItems, PricingContext};

/// Externally owned query for the active discount rules
#[async_trait]
pub trait DiscountSource: Send + Sync {
    /// Active standard discounts for a brand/location/delivery-type context
    async fn active_discounts(
        &self,
        brand_id: &str,
        location_id: &str,
        delivery_type: DeliveryType,
    ) -> Result<Vec<StandardDiscount>, SourceError>;
}

/// One customer's cart scope with continuously derived totals
pub struct CheckoutSession<S: DiscountSource> {
    source: S,
    brand: Brand,
    location: Location,
    lock_policy: Box<dyn LockedItemPolicy>,
    state: CartState,
    discounts: Vec<StandardDiscount>,
    totals: CartTotals,
}

impl<S: DiscountSource> CheckoutSession<S> {
    /// Create a session with an empty cart. Call `refresh_discounts` to
    /// load the initial rule set; until then no automatic discount applies.
    pub fn new(source: S, brand: Brand, location: Location) -> Self {
        let state = CartState::new(&brand.id, &location.id);
        let mut session = Self {
            source,
            brand,
            location,
            lock_policy: Box::new(NoLockedItems),
            state,
            discounts: Vec::new(),
            totals: CartTotals::default(),
        };
        session.recompute_now();
        session
    }

    /// Install the caller-owned locked-item predicate
    pub fn with_lock_policy(mut self, policy: impl LockedItemPolicy + 'static) -> Self {
        self.lock_policy = Box::new(policy);
        self.recompute_now();
        self
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    pub fn discounts(&self) -> &[StandardDiscount] {
        &self.discounts
    }

    /// Re-fetch the active discounts for the current context. Fail-open:
    /// an error keeps the previous set and no retry is attempted.
    pub async fn refresh_discounts(&mut self) {
        match self
            .source
            .active_discounts(&self.brand.id, &self.location.id, self.state.delivery_type)
            .await
        {
            Ok(discounts) => self.discounts = discounts,
            Err(err) => {
                tracing::warn!(
                    brand_id = %self.brand.id,
                    location_id = %self.location.id,
                    error = %err,
                    "Discount refresh failed, keeping previous rules"
                );
            }
        }
        self.recompute_now();
    }

    /// Add an item to the cart. Invalid input (non-finite or out-of-bounds
    /// price, non-positive quantity) is rejected before it can enter the
    /// pricing pass.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        validate_item(&item)?;
        self.apply(|state| state.with_item_added(item));
        Ok(())
    }

    pub fn remove_item(&mut self, signature: &str) {
        self.apply(|state| state.with_item_removed(signature));
    }

    pub fn set_quantity(&mut self, signature: &str, quantity: i32) {
        self.apply(|state| state.with_quantity(signature, quantity));
    }

    pub fn apply_voucher(&mut self, voucher: Voucher) {
        self.apply(|state| state.with_voucher(voucher));
    }

    pub fn remove_voucher(&mut self) {
        self.apply(CartState::without_voucher);
    }

    pub fn set_bag_fee(&mut self, include: bool) {
        self.apply(|state| state.with_bag_fee(include));
    }

    /// Switch delivery type and re-fetch the discounts scoped to it
    pub async fn set_delivery_type(&mut self, delivery_type: DeliveryType) {
        if self.state.delivery_type == delivery_type {
            return;
        }
        self.apply(|state| state.with_delivery_type(delivery_type));
        self.refresh_discounts().await;
    }

    /// Switch brand/location; the cart does not carry over
    pub async fn switch_store(&mut self, brand: Brand, location: Location) {
        self.apply(|state| state.with_store(&brand.id, &location.id));
        self.brand = brand;
        self.location = location;
        self.discounts.clear();
        self.refresh_discounts().await;
    }

    /// Finalize the order: returns the payment breakdown for the
    /// submission payload and clears the cart.
    pub fn place_order(&mut self) -> PaymentDetails {
        let details = self.totals.payment_details();
        self.apply(CartState::cleared);
        details
    }

    fn apply<F: FnOnce(CartState) -> CartState>(&mut self, action: F) {
        let state = std::mem::take(&mut self.state);
        self.state = action(state);
        self.recompute_now();
    }

    fn recompute_now(&mut self) {
        let ctx = PricingContext {
            brand: &self.brand,
            location: &self.location,
            discounts: &self.discounts,
        };
        self.totals = recompute(&self.state, &ctx, self.lock_policy.as_ref());
    }
}
