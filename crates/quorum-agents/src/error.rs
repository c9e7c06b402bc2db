//! Error types for agent implementations.

use thiserror::Error;

/// Errors an agent can raise across the capability boundary.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The agent failed its startup hook.
    #[error("agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Content analysis failed.
    #[error("content analysis failed: {0}")]
    AnalysisFailed(String),

    /// An upstream AI provider was unreachable or returned an error.
    #[error("provider '{provider}' unavailable: {reason}")]
    ProviderUnavailable {
        /// Name of the provider.
        provider: String,
        /// What went wrong.
        reason: String,
    },

    /// The invocation exceeded its deadline.
    #[error("agent invocation timed out after {0} ms")]
    Timeout(u64),
}
