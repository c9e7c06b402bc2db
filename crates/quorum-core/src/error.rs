//! Error types for the coordination core.

use thiserror::Error;

use quorum_registry::RegistryError;

/// Errors visible to callers of the moderation facade.
///
/// The propagation policy is deliberately narrow: agent invocation
/// errors and timeouts degrade to best-effort decisions inside the
/// pipeline, so the only error `request_moderation` ever returns is a
/// total registry miss.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// No agents are deployed at all for the community.
    #[error("no agents deployed for community '{community_id}'")]
    NoAgentsDeployed {
        /// The community without a deployment.
        community_id: String,
    },

    /// A deployment operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
