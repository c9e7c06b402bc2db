//! # Quorum Monitor
//!
//! Running performance statistics for deployed moderation agents.
//!
//! The [`PerformanceTracker`] keeps one record per (community, agent
//! type): decision count, mean confidence, mean latency, and an
//! active/recovering/failed status flag. Records are mutated only by
//! the tracker itself (as decisions complete) and by the failure
//! handler (status transitions); reporting reads snapshots.

pub mod tracker;

pub use tracker::{AgentStatus, PerformanceRecord, PerformanceTracker};
