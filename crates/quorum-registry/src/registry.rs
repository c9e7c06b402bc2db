//! The live agent registry.
//!
//! Process-wide mapping of (community, agent type) to the running
//! [`AgentInstance`]. Writes serialize per key through the underlying
//! sharded map; reads take snapshots and never block writes to other
//! keys.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};

use quorum_agents::{Agent, AgentFactory, AgentType};

use crate::error::RegistryError;

/// A live agent deployed for one community.
///
/// Exactly one instance exists per (community, agent type); the registry
/// enforces this by replacing on redeploy.
pub struct AgentInstance {
    /// The specialist kind.
    pub agent_type: AgentType,
    /// Community this instance serves.
    pub community_id: String,
    /// Handle to the opaque agent capability.
    pub agent: Box<dyn Agent>,
}

impl std::fmt::Debug for AgentInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentInstance")
            .field("agent_type", &self.agent_type)
            .field("community_id", &self.community_id)
            .field("description", &self.agent.description())
            .finish()
    }
}

/// Per-community registry of live agents.
///
/// Deployment and failure recovery write; content analysis reads. The
/// nested sharded maps give per-key write serialization with concurrent
/// reads elsewhere.
pub struct AgentRegistry {
    factory: Arc<dyn AgentFactory>,
    communities: DashMap<String, Arc<DashMap<AgentType, Arc<AgentInstance>>>>,
}

impl AgentRegistry {
    /// Creates a registry that builds agents through the given factory.
    pub fn new(factory: Arc<dyn AgentFactory>) -> Self {
        Self {
            factory,
            communities: DashMap::new(),
        }
    }

    /// Deploys an agent type for a community.
    ///
    /// Builds a fresh instance, runs its initialization hook, and
    /// inserts it. Redeploying an existing type replaces the running
    /// instance rather than duplicating it. An initialization failure
    /// propagates as a deployment error and nothing is inserted.
    pub async fn deploy(
        &self,
        community_id: &str,
        agent_type: AgentType,
    ) -> Result<(), RegistryError> {
        let agent = self.factory.build(agent_type, community_id);
        agent
            .initialize()
            .await
            .map_err(|source| RegistryError::DeploymentFailed {
                community_id: community_id.to_string(),
                agent_type,
                source,
            })?;

        let instance = Arc::new(AgentInstance {
            agent_type,
            community_id: community_id.to_string(),
            agent,
        });
        self.replace(community_id, agent_type, instance);
        info!(community_id, agent_type = %agent_type, "agent deployed");
        Ok(())
    }

    /// Replaces (or installs) the live instance for one key.
    pub fn replace(&self, community_id: &str, agent_type: AgentType, instance: Arc<AgentInstance>) {
        let agents = self
            .communities
            .entry(community_id.to_string())
            .or_default()
            .clone();
        agents.insert(agent_type, instance);
        debug!(community_id, agent_type = %agent_type, "registry entry replaced");
    }

    /// Removes a live instance, if present.
    ///
    /// Used when recovery gives up on an agent so routing stops
    /// selecting it.
    pub fn remove(&self, community_id: &str, agent_type: AgentType) -> bool {
        self.communities
            .get(community_id)
            .map(|agents| agents.remove(&agent_type).is_some())
            .unwrap_or(false)
    }

    /// Snapshot of the live agents for a community.
    pub fn get(&self, community_id: &str) -> HashMap<AgentType, Arc<AgentInstance>> {
        self.communities
            .get(community_id)
            .map(|agents| {
                agents
                    .iter()
                    .map(|entry| (*entry.key(), entry.value().clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether a specific agent type is live for a community.
    pub fn is_deployed(&self, community_id: &str, agent_type: AgentType) -> bool {
        self.communities
            .get(community_id)
            .map(|agents| agents.contains_key(&agent_type))
            .unwrap_or(false)
    }

    /// Number of live agents for a community.
    pub fn deployed_count(&self, community_id: &str) -> usize {
        self.communities
            .get(community_id)
            .map(|agents| agents.len())
            .unwrap_or(0)
    }
}
