//! Error types for deployment and the registry.

use thiserror::Error;

use quorum_agents::{AgentError, AgentType};

/// Errors raised by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An agent failed its initialization hook during deployment.
    ///
    /// The agent type is not added to the registry; partial deployment
    /// of a community is allowed and expected.
    #[error("deployment of {agent_type} for community '{community_id}' failed: {source}")]
    DeploymentFailed {
        /// Community the deployment was for.
        community_id: String,
        /// The agent type that failed to start.
        agent_type: AgentType,
        /// The underlying agent error.
        #[source]
        source: AgentError,
    },
}
