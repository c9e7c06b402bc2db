//! Failure detection and recovery for individual agents.
//!
//! State machine per (community, agent type):
//! `active -> recovering -> { active | failed }`. Recovery rebuilds the
//! agent through the registry's factory and redeploys it; the backup
//! path is the same restart operation retried. When every attempt
//! fails, the agent is marked failed and removed from the registry so
//! routing stops selecting it — the rest of the pipeline keeps serving.

use std::sync::Arc;

use tracing::{info, warn};

use quorum_agents::AgentType;
use quorum_monitor::PerformanceTracker;
use quorum_registry::AgentRegistry;

/// Restores failed agents, isolating the failure to one registry key.
pub struct FailureHandler {
    registry: Arc<AgentRegistry>,
    tracker: Arc<PerformanceTracker>,
    max_attempts: u32,
}

impl FailureHandler {
    /// Creates a handler with the given attempt budget.
    pub fn new(
        registry: Arc<AgentRegistry>,
        tracker: Arc<PerformanceTracker>,
        max_attempts: u32,
    ) -> Self {
        Self {
            registry,
            tracker,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Attempts to recover one agent.
    ///
    /// Returns `true` when a fresh instance is serving again. On
    /// exhausted attempts the agent is marked failed, removed from the
    /// registry, and stays out of rotation until an administrator
    /// redeploys it explicitly.
    pub async fn handle_failure(&self, community_id: &str, agent_type: AgentType) -> bool {
        self.tracker.mark_recovering(community_id, agent_type);

        for attempt in 1..=self.max_attempts {
            match self.registry.deploy(community_id, agent_type).await {
                Ok(()) => {
                    self.tracker.mark_active(community_id, agent_type);
                    info!(
                        community_id,
                        agent_type = %agent_type,
                        attempt,
                        "agent recovered"
                    );
                    return true;
                }
                Err(err) => {
                    warn!(
                        community_id,
                        agent_type = %agent_type,
                        attempt,
                        error = %err,
                        "recovery attempt failed"
                    );
                }
            }
        }

        self.tracker.mark_failed(community_id, agent_type);
        self.registry.remove(community_id, agent_type);
        warn!(
            community_id,
            agent_type = %agent_type,
            "agent marked failed and removed from rotation"
        );
        false
    }
}
