//! The agent capability boundary.
//!
//! Defines the [`Agent`] trait every moderation specialist implements,
//! the [`AgentType`] tag the coordinator routes by, and the [`Provider`]
//! trait marking where LLM-backed implementations call out. The
//! coordination core never inspects how a decision was produced.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::content::ContentItem;
use crate::decision::Decision;
use crate::error::AgentError;

/// Tag identifying one of the fixed specialist kinds.
///
/// Stable across the process lifetime; exactly one live instance per
/// (community, agent type) exists at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentType {
    /// General safety net; broad mandate, weighted 1.2 in voting.
    Guardian,
    /// Quality and relevance review; broad mandate, weighted 1.2.
    ContentQuality,
    /// Policy-explanation and audit-trail agent.
    Transparency,
    /// Harassment and abuse specialist.
    Harassment,
    /// Spam and manipulation specialist.
    Spam,
    /// Misinformation specialist.
    Misinformation,
    /// Personal-data exposure specialist.
    PrivacyProtection,
    /// Legal and regulatory compliance specialist.
    LegalCompliance,
    /// Minor-safety specialist.
    YouthSafety,
    /// Self-harm and emergency specialist.
    CrisisManagement,
    /// Visual content specialist.
    ImageModerator,
    /// Cross-language specialist.
    MultilingualModerator,
}

impl AgentType {
    /// Kebab-case identifier, matching the serde representation.
    pub fn label(self) -> &'static str {
        match self {
            AgentType::Guardian => "guardian",
            AgentType::ContentQuality => "content-quality",
            AgentType::Transparency => "transparency",
            AgentType::Harassment => "harassment",
            AgentType::Spam => "spam",
            AgentType::Misinformation => "misinformation",
            AgentType::PrivacyProtection => "privacy-protection",
            AgentType::LegalCompliance => "legal-compliance",
            AgentType::YouthSafety => "youth-safety",
            AgentType::CrisisManagement => "crisis-management",
            AgentType::ImageModerator => "image-moderator",
            AgentType::MultilingualModerator => "multilingual-moderator",
        }
    }

    /// All known agent types.
    pub fn all() -> [AgentType; 12] {
        [
            AgentType::Guardian,
            AgentType::ContentQuality,
            AgentType::Transparency,
            AgentType::Harassment,
            AgentType::Spam,
            AgentType::Misinformation,
            AgentType::PrivacyProtection,
            AgentType::LegalCompliance,
            AgentType::YouthSafety,
            AgentType::CrisisManagement,
            AgentType::ImageModerator,
            AgentType::MultilingualModerator,
        ]
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-invocation context handed to an agent alongside the content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentContext {
    /// Community the invocation is on behalf of.
    pub community_id: String,
    /// How many agents are deployed for that community.
    pub deployed_agents: usize,
    /// Recent moderation history summaries, newest last.
    pub history: Vec<String>,
}

impl AgentContext {
    /// Creates a context for a community.
    pub fn for_community(community_id: impl Into<String>) -> Self {
        Self {
            community_id: community_id.into(),
            deployed_agents: 0,
            history: Vec::new(),
        }
    }

    /// Sets the deployed-agent count.
    pub fn with_deployed_agents(mut self, count: usize) -> Self {
        self.deployed_agents = count;
        self
    }
}

/// A moderation agent: analyzes one content item and renders an opinion.
///
/// Implementations are opaque to the coordinator. They may be pure
/// keyword heuristics (see [`crate::specialists`]) or call an external
/// model through a [`Provider`].
#[async_trait]
pub trait Agent: Send + Sync {
    /// One-time startup hook, called during deployment.
    ///
    /// A failure here is a deployment error; the agent is not registered.
    async fn initialize(&self) -> Result<(), AgentError>;

    /// Analyzes a content item and returns a decision.
    ///
    /// `trust_score` is the author's standing in `[0, 1]`.
    async fn analyze_content(
        &self,
        item: &ContentItem,
        trust_score: f64,
        context: &AgentContext,
    ) -> Result<Decision, AgentError>;

    /// The capabilities this agent advertises.
    fn capabilities(&self) -> Vec<String>;

    /// Human-readable description of the agent.
    fn description(&self) -> &str;
}

/// The AI-provider capability agents may call out to.
///
/// Not part of the coordination core's contract surface; it exists so
/// LLM-backed [`Agent`] implementations have a seam to plug into.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Sends a prompt plus content to the named provider and returns the
    /// raw model text.
    async fn call(
        &self,
        provider_name: &str,
        prompt: &str,
        content: &str,
    ) -> Result<String, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_type_labels_unique() {
        let labels: std::collections::BTreeSet<_> =
            AgentType::all().iter().map(|t| t.label()).collect();
        assert_eq!(labels.len(), AgentType::all().len());
    }

    #[test]
    fn test_agent_type_serde_kebab_case() {
        let json = serde_json::to_string(&AgentType::YouthSafety).unwrap();
        assert_eq!(json, "\"youth-safety\"");
        let back: AgentType = serde_json::from_str("\"content-quality\"").unwrap();
        assert_eq!(back, AgentType::ContentQuality);
    }

    #[test]
    fn test_context_builder() {
        let ctx = AgentContext::for_community("community-1").with_deployed_agents(5);
        assert_eq!(ctx.community_id, "community-1");
        assert_eq!(ctx.deployed_agents, 5);
    }
}
