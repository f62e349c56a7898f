//! Upsell trigger matching
//!
//! A stateless matching pass over a cart snapshot at checkout intent,
//! plus the view/conversion counter store the surfacing flow writes to.

pub mod matcher;
pub mod schedule;
pub mod service;
pub mod stats;

pub use matcher::{match_upsell, UpsellMatch};
pub use schedule::is_schedule_active;
pub use service::UpsellService;
pub use stats::{MemoryUpsellStats, UpsellCounters, UpsellStatsStore};
