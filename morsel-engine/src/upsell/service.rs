//! Upsell Service
//!
//! Wraps the matcher with its counter side effects. Counter failures are
//! logged and never block surfacing the dialog or proceeding to checkout.

use chrono::NaiveDateTime;
use shared::cart::CartState;
use shared::models::{Product, Upsell};

use super::matcher::{match_upsell, UpsellMatch};
use super::stats::UpsellStatsStore;

/// Matcher plus counter store for one brand/location scope
pub struct UpsellService<S: UpsellStatsStore> {
    stats: S,
}

impl<S: UpsellStatsStore> UpsellService<S> {
    pub fn new(stats: S) -> Self {
        Self { stats }
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    /// Match and surface at most one campaign, recording the view.
    /// The view count is not rolled back if the dialog is never shown.
    pub async fn surface(
        &self,
        state: &CartState,
        cart_total: f64,
        upsells: &[Upsell],
        catalog: &[Product],
        now: NaiveDateTime,
    ) -> Option<UpsellMatch> {
        let matched = match_upsell(state, cart_total, upsells, catalog, now)?;
        if let Err(err) = self.stats.increment_views(&matched.upsell_id).await {
            tracing::warn!(
                upsell_id = %matched.upsell_id,
                error = %err,
                "Failed to record upsell view"
            );
        }
        Some(matched)
    }

    /// Record an accepted offer. Calling this twice (e.g. a network
    /// retry) double-counts; no deduplication key exists.
    pub async fn record_conversion(&self, upsell_id: &str) {
        if let Err(err) = self.stats.increment_conversions(upsell_id).await {
            tracing::warn!(
                upsell_id = %upsell_id,
                error = %err,
                "Failed to record upsell conversion"
            );
        }
    }
}
