//! The unified moderation facade.
//!
//! [`Moderator`] wires the registry, router, coordinator, aggregator,
//! tracker and failure handler into the single synchronous entry point
//! callers use. The pipeline per item is:
//! registry snapshot -> route -> concurrent fan-out -> weighted
//! aggregation -> tracker update.
//!
//! The facade honors an "always answer" contract: agent errors and
//! timeouts degrade to a best-effort decision; the only error a caller
//! ever sees is a community with no deployment at all.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info, warn};

use quorum_agents::{
    AgentContext, AgentFactory, AgentType, ContentItem, Decision, HeuristicFactory,
};
use quorum_ensemble::EnsembleAggregator;
use quorum_monitor::{PerformanceRecord, PerformanceTracker};
use quorum_registry::{AgentRegistry, CommunityProfile, DeploymentSelector};

use crate::config::ModeratorConfig;
use crate::coordinator::Coordinator;
use crate::error::ModerationError;
use crate::recovery::FailureHandler;
use crate::router::ContentRouter;
use crate::Result;

/// Coordinates a pool of moderation agents per community and
/// synthesizes their opinions into one authoritative decision.
pub struct Moderator {
    config: ModeratorConfig,
    registry: Arc<AgentRegistry>,
    tracker: Arc<PerformanceTracker>,
    selector: DeploymentSelector,
    router: ContentRouter,
    coordinator: Coordinator,
    aggregator: EnsembleAggregator,
    recovery: Arc<FailureHandler>,
    /// Last seen profile per community, for redeployment.
    profiles: DashMap<String, CommunityProfile>,
}

impl Moderator {
    /// Creates a moderator using the built-in heuristic agents.
    pub fn new(config: ModeratorConfig) -> Self {
        Self::with_factory(config, Arc::new(HeuristicFactory))
    }

    /// Creates a moderator with a custom agent factory (e.g. LLM-backed
    /// agents).
    pub fn with_factory(config: ModeratorConfig, factory: Arc<dyn AgentFactory>) -> Self {
        let registry = Arc::new(AgentRegistry::new(factory));
        let tracker = Arc::new(PerformanceTracker::new());
        let recovery = Arc::new(FailureHandler::new(
            registry.clone(),
            tracker.clone(),
            config.recovery.max_attempts,
        ));
        let coordinator = Coordinator::new(config.coordinator.agent_timeout());

        Self {
            config,
            registry,
            tracker,
            selector: DeploymentSelector::new(),
            router: ContentRouter::new(),
            coordinator,
            aggregator: EnsembleAggregator::new(),
            recovery,
            profiles: DashMap::new(),
        }
    }

    /// Onboards a community: selects and deploys its agent types.
    ///
    /// Deployment is partial-tolerant: an agent that fails its
    /// initialization hook is logged and skipped, the rest deploy.
    /// Returns the agent types that are live.
    pub async fn onboard_community(&self, profile: &CommunityProfile) -> Vec<AgentType> {
        let selected = self.selector.select(profile);
        let mut deployed = Vec::new();

        for agent_type in selected {
            match self.registry.deploy(&profile.community_id, agent_type).await {
                Ok(()) => {
                    self.tracker.mark_active(&profile.community_id, agent_type);
                    deployed.push(agent_type);
                }
                Err(err) => {
                    warn!(
                        community_id = %profile.community_id,
                        agent_type = %agent_type,
                        error = %err,
                        "agent skipped during onboarding"
                    );
                }
            }
        }

        self.profiles
            .insert(profile.community_id.clone(), profile.clone());
        info!(
            community_id = %profile.community_id,
            deployed = deployed.len(),
            "community onboarded"
        );
        deployed
    }

    /// Redeploys a community from a refreshed profile snapshot.
    ///
    /// Additive like the selector itself: qualifying agent types are
    /// (re)deployed, nothing is auto-removed.
    pub async fn redeploy_community(&self, profile: &CommunityProfile) -> Vec<AgentType> {
        info!(community_id = %profile.community_id, "redeploying community");
        self.onboard_community(profile).await
    }

    /// Explicitly deploys one agent type for a community.
    ///
    /// The administrative path for re-adding an agent that recovery
    /// marked failed.
    pub async fn deploy_agent(&self, community_id: &str, agent_type: AgentType) -> Result<()> {
        self.registry.deploy(community_id, agent_type).await?;
        self.tracker.mark_active(community_id, agent_type);
        Ok(())
    }

    /// Moderates one content item.
    ///
    /// Routes the item to the relevant deployed agents, invokes them
    /// concurrently, aggregates their decisions with trust-score
    /// adjustment, and records per-agent statistics. A single agent's
    /// error or timeout never blocks the decision.
    ///
    /// # Errors
    ///
    /// Returns [`ModerationError::NoAgentsDeployed`] when the community
    /// has no live agents at all. Every other failure degrades to a
    /// best-effort decision.
    pub async fn request_moderation(
        &self,
        item: &ContentItem,
        trust_score: f64,
    ) -> Result<Decision> {
        let deployed = self.registry.get(&item.community_id);
        if deployed.is_empty() {
            return Err(ModerationError::NoAgentsDeployed {
                community_id: item.community_id.clone(),
            });
        }

        let context = AgentContext::for_community(&item.community_id)
            .with_deployed_agents(deployed.len());
        let routed = self.router.route(item, &deployed);
        debug!(item_id = %item.id, routed = routed.len(), "coordinating agents");

        let outcome = self
            .coordinator
            .coordinate(item, routed, trust_score, &context)
            .await;

        for (agent_type, decision, latency) in &outcome.decisions {
            self.tracker
                .record_decision(&item.community_id, *agent_type, decision.confidence, *latency);
        }

        for (agent_type, err) in &outcome.failures {
            warn!(
                item_id = %item.id,
                agent_type = %agent_type,
                error = %err,
                "agent failed during coordination"
            );
            if self.config.recovery.auto_recover {
                let recovery = self.recovery.clone();
                let community_id = item.community_id.clone();
                let agent_type = *agent_type;
                // Recovery runs off the request path; the decision below
                // is produced from the agents that did answer.
                tokio::spawn(async move {
                    recovery.handle_failure(&community_id, agent_type).await;
                });
            }
        }

        let decision = self
            .aggregator
            .aggregate(&outcome.decision_pairs(), trust_score);
        info!(
            item_id = %item.id,
            action = %decision.action,
            contributors = outcome.decisions.len(),
            "moderation decision"
        );
        Ok(decision)
    }

    /// Read-only snapshot of per-agent performance for a community.
    pub fn get_performance(&self, community_id: &str) -> HashMap<AgentType, PerformanceRecord> {
        self.tracker.snapshot(community_id)
    }

    /// Explicit recovery trigger for one agent.
    ///
    /// Also invoked automatically by the coordination path when
    /// `recovery.auto_recover` is on. Returns whether the agent is
    /// serving again.
    pub async fn handle_agent_failure(&self, community_id: &str, agent_type: AgentType) -> bool {
        self.recovery.handle_failure(community_id, agent_type).await
    }

    /// The live agent types for a community.
    pub fn deployed_agents(&self, community_id: &str) -> Vec<AgentType> {
        let mut types: Vec<AgentType> = self.registry.get(community_id).into_keys().collect();
        types.sort();
        types
    }

    /// The last profile snapshot seen for a community.
    pub fn community_profile(&self, community_id: &str) -> Option<CommunityProfile> {
        self.profiles.get(community_id).map(|p| p.clone())
    }
}
