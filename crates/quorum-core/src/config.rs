//! Configuration for the moderation coordinator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the moderation facade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModeratorConfig {
    /// Coordinator fan-out settings.
    pub coordinator: CoordinatorConfig,

    /// Failure recovery settings.
    pub recovery: RecoveryConfig,
}

/// Coordinator fan-out settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Per-agent invocation deadline in milliseconds. A timeout is
    /// treated identically to an invocation error and cancels only that
    /// agent's call.
    pub agent_timeout_ms: u64,
}

impl CoordinatorConfig {
    /// Per-agent deadline as a [`Duration`].
    pub fn agent_timeout(&self) -> Duration {
        Duration::from_millis(self.agent_timeout_ms)
    }

    /// Sets the per-agent deadline.
    #[must_use]
    pub const fn with_agent_timeout_ms(mut self, ms: u64) -> Self {
        self.agent_timeout_ms = ms;
        self
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            agent_timeout_ms: 5_000,
        }
    }
}

/// Failure recovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Redeploy attempts before an agent is marked failed. The second
    /// attempt is the "backup deployment" path, which is the same
    /// restart operation.
    pub max_attempts: u32,

    /// Trigger recovery automatically when the coordinator observes an
    /// invocation failure.
    pub auto_recover: bool,
}

impl RecoveryConfig {
    /// Sets the attempt budget.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Enables or disables automatic recovery.
    #[must_use]
    pub const fn with_auto_recover(mut self, enabled: bool) -> Self {
        self.auto_recover = enabled;
        self
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            auto_recover: true,
        }
    }
}
