//! Per-agent performance statistics.
//!
//! The tracker records one entry per (community, agent type): a
//! monotonically increasing decision counter, running mean confidence
//! and latency, and an active/failed status flag. Updates are
//! increment-only and safe under concurrent writers: the sharded map
//! serializes access per key and each record sits behind its own lock.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quorum_agents::AgentType;

/// Lifecycle status of a deployed agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Agent is serving traffic.
    Active,
    /// Agent errored and recovery is in progress.
    Recovering,
    /// Recovery failed; agent is out of rotation until redeployed.
    Failed,
}

/// Snapshot of one agent's running statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Total decisions recorded. Monotonically increasing.
    pub decisions_made: u64,
    /// Running mean of decision confidence.
    pub mean_confidence: f64,
    /// Running mean of invocation latency in milliseconds.
    pub mean_latency_ms: f64,
    /// Current lifecycle status.
    pub status: AgentStatus,
}

/// Mutable backing stats, guarded by a per-record lock.
#[derive(Debug)]
struct RecordStats {
    decisions_made: u64,
    confidence_sum: f64,
    latency_sum_ms: f64,
    status: AgentStatus,
}

impl RecordStats {
    fn new() -> Self {
        Self {
            decisions_made: 0,
            confidence_sum: 0.0,
            latency_sum_ms: 0.0,
            status: AgentStatus::Active,
        }
    }

    fn snapshot(&self) -> PerformanceRecord {
        let n = self.decisions_made;
        PerformanceRecord {
            decisions_made: n,
            mean_confidence: if n == 0 { 0.0 } else { self.confidence_sum / n as f64 },
            mean_latency_ms: if n == 0 { 0.0 } else { self.latency_sum_ms / n as f64 },
            status: self.status,
        }
    }
}

/// Records per-agent-per-community running statistics.
pub struct PerformanceTracker {
    records: DashMap<(String, AgentType), Mutex<RecordStats>>,
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    fn with_stats<R>(
        &self,
        community_id: &str,
        agent_type: AgentType,
        f: impl FnOnce(&mut RecordStats) -> R,
    ) -> R {
        let key = (community_id.to_string(), agent_type);
        let entry = self.records.entry(key).or_insert_with(|| Mutex::new(RecordStats::new()));
        let mut stats = entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut stats)
    }

    /// Records a completed decision.
    pub fn record_decision(
        &self,
        community_id: &str,
        agent_type: AgentType,
        confidence: f64,
        latency: Duration,
    ) {
        self.with_stats(community_id, agent_type, |stats| {
            stats.decisions_made += 1;
            stats.confidence_sum += confidence;
            stats.latency_sum_ms += latency.as_secs_f64() * 1000.0;
        });
        debug!(community_id, agent_type = %agent_type, "decision recorded");
    }

    /// Marks an agent as recovering after an invocation error.
    pub fn mark_recovering(&self, community_id: &str, agent_type: AgentType) {
        self.with_stats(community_id, agent_type, |stats| {
            stats.status = AgentStatus::Recovering;
        });
    }

    /// Marks an agent as active (deployed or recovered).
    pub fn mark_active(&self, community_id: &str, agent_type: AgentType) {
        self.with_stats(community_id, agent_type, |stats| {
            stats.status = AgentStatus::Active;
        });
    }

    /// Marks an agent as failed after recovery gave up.
    pub fn mark_failed(&self, community_id: &str, agent_type: AgentType) {
        self.with_stats(community_id, agent_type, |stats| {
            stats.status = AgentStatus::Failed;
        });
    }

    /// Current status of an agent, if it has ever been tracked.
    pub fn status(&self, community_id: &str, agent_type: AgentType) -> Option<AgentStatus> {
        let key = (community_id.to_string(), agent_type);
        self.records.get(&key).map(|entry| {
            entry
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .status
        })
    }

    /// Read-only snapshot of all records for a community.
    pub fn snapshot(&self, community_id: &str) -> HashMap<AgentType, PerformanceRecord> {
        self.records
            .iter()
            .filter(|entry| entry.key().0 == community_id)
            .map(|entry| {
                let record = entry
                    .value()
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .snapshot();
                (entry.key().1, record)
            })
            .collect()
    }
}
