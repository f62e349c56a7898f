//! Upsell Counters
//!
//! View/conversion increments are read-modify-write against the backing
//! store, so they go through an optimistic compare-and-swap: concurrent
//! shoppers hitting the same campaign never lose updates. This is the
//! only stateful part of the engine.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::StatsError;

/// Attempts before a counter update reports contention
const MAX_CAS_RETRIES: usize = 8;

/// Campaign counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsellCounters {
    /// Incremented each time the campaign is surfaced
    pub views: u64,
    /// Incremented on acceptance; not deduplicated across retries
    pub conversions: u64,
}

/// Backing store for campaign counters
#[async_trait]
pub trait UpsellStatsStore: Send + Sync {
    async fn increment_views(&self, upsell_id: &str) -> Result<UpsellCounters, StatsError>;
    async fn increment_conversions(&self, upsell_id: &str) -> Result<UpsellCounters, StatsError>;
    async fn get(&self, upsell_id: &str) -> Option<UpsellCounters>;
}

#[derive(Debug, Clone, Copy)]
struct VersionedCounters {
    version: u64,
    counters: UpsellCounters,
}

/// In-memory store with versioned compare-and-swap updates
#[derive(Debug, Clone, Default)]
pub struct MemoryUpsellStats {
    entries: Arc<DashMap<String, VersionedCounters>>,
}

impl MemoryUpsellStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn compare_and_swap<F>(&self, upsell_id: &str, bump: F) -> Result<UpsellCounters, StatsError>
    where
        F: Fn(&mut UpsellCounters),
    {
        for _ in 0..MAX_CAS_RETRIES {
            let observed = self.entries.get(upsell_id).map(|e| (e.version, e.counters));
            match observed {
                None => {
                    let mut counters = UpsellCounters::default();
                    bump(&mut counters);
                    match self.entries.entry(upsell_id.to_string()) {
                        dashmap::mapref::entry::Entry::Vacant(slot) => {
                            slot.insert(VersionedCounters {
                                version: 1,
                                counters,
                            });
                            return Ok(counters);
                        }
                        // Another writer created the entry first; retry
                        dashmap::mapref::entry::Entry::Occupied(_) => continue,
                    }
                }
                Some((version, observed_counters)) => {
                    let mut counters = observed_counters;
                    bump(&mut counters);
                    if let Some(mut entry) = self.entries.get_mut(upsell_id) {
                        // Conditional write: only if nobody moved the
                        // version since we read it
                        if entry.version == version {
                            entry.version += 1;
                            entry.counters = counters;
                            return Ok(counters);
                        }
                    }
                }
            }
        }
        Err(StatsError::Contention(upsell_id.to_string(), MAX_CAS_RETRIES))
    }
}

#[async_trait]
impl UpsellStatsStore for MemoryUpsellStats {
    async fn increment_views(&self, upsell_id: &str) -> Result<UpsellCounters, StatsError> {
        self.compare_and_swap(upsell_id, |c| c.views += 1)
    }

    async fn increment_conversions(&self, upsell_id: &str) -> Result<UpsellCounters, StatsError> {
        self.compare_and_swap(upsell_id, |c| c.conversions += 1)
    }

    async fn get(&self, upsell_id: &str) -> Option<UpsellCounters> {
        self.entries.get(upsell_id).map(|e| e.counters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_increment_from_empty() {
        let stats = MemoryUpsellStats::new();
        let counters = stats.increment_views("u1").await.unwrap();
        assert_eq!(counters.views, 1);
        assert_eq!(counters.conversions, 0);
    }

    #[tokio::test]
    async fn test_views_and_conversions_are_independent() {
        let stats = MemoryUpsellStats::new();
        stats.increment_views("u1").await.unwrap();
        stats.increment_views("u1").await.unwrap();
        stats.increment_conversions("u1").await.unwrap();

        let counters = stats.get("u1").await.unwrap();
        assert_eq!(counters.views, 2);
        assert_eq!(counters.conversions, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_campaign_is_none() {
        let stats = MemoryUpsellStats::new();
        assert!(stats.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_increments_lose_nothing() {
        let stats = MemoryUpsellStats::new();
        let mut handles = Vec::new();
        for _ in 0..50 {
            let stats = stats.clone();
            handles.push(tokio::spawn(async move {
                stats.increment_views("u1").await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(stats.get("u1").await.unwrap().views, 50);
    }

    #[tokio::test]
    async fn test_conversion_retry_double_counts() {
        // No dedup key exists: replaying the same acceptance counts twice
        let stats = MemoryUpsellStats::new();
        stats.increment_conversions("u1").await.unwrap();
        stats.increment_conversions("u1").await.unwrap();

        assert_eq!(stats.get("u1").await.unwrap().conversions, 2);
    }
}
