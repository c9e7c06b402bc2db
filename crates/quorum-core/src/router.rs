//! Content-based agent routing.
//!
//! Narrows the full community deployment down to the agents relevant to
//! one content item: the always-on core subset plus any specialist whose
//! trigger predicate matches. Routing is a pure function of the item and
//! the deployment snapshot; a triggered type that is not deployed is
//! silently omitted.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use quorum_agents::{AgentType, ContentItem, ContentType};
use quorum_registry::AgentInstance;

/// Agent types that see every item when deployed.
const CORE_TYPES: [AgentType; 3] = [
    AgentType::Guardian,
    AgentType::ContentQuality,
    AgentType::Transparency,
];

/// A specialist trigger: keyword presence routes the item to the agent.
struct Trigger {
    agent_type: AgentType,
    keywords: Regex,
}

impl Trigger {
    fn new(agent_type: AgentType, pattern: &str) -> Self {
        Self {
            agent_type,
            // Trigger tables are static; a malformed pattern is a
            // programming error.
            keywords: Regex::new(pattern).unwrap(),
        }
    }
}

/// Routes content items to the subset of deployed agents that should
/// see them.
pub struct ContentRouter {
    triggers: Vec<Trigger>,
    /// Primary language; items in any other language trigger the
    /// multilingual specialist.
    primary_language: String,
}

impl Default for ContentRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRouter {
    /// Creates a router with the standard trigger table.
    pub fn new() -> Self {
        Self {
            triggers: vec![
                Trigger::new(
                    AgentType::Harassment,
                    r"(?i)\b(idiot|loser|pathetic|worthless|harass|bully)\b",
                ),
                Trigger::new(
                    AgentType::Spam,
                    r"(?i)\b(buy\s+now|limited\s+offer|click\s+here|free\s+money|giveaway)\b",
                ),
                Trigger::new(
                    AgentType::Misinformation,
                    r"(?i)\b(miracle\s+cure|hoax|fake\s+news|they\s+don'?t\s+want\s+you\s+to\s+know)\b",
                ),
                Trigger::new(
                    AgentType::PrivacyProtection,
                    r"(?i)(\b\d{3}-\d{2}-\d{4}\b|\baddress\s+is\b|\bphone\s+number\s+is\b)",
                ),
                Trigger::new(
                    AgentType::CrisisManagement,
                    r"(?i)\b(want\s+to\s+die|end\s+it\s+all|hurt\s+myself|suicide)\b",
                ),
                Trigger::new(
                    AgentType::YouthSafety,
                    r"(?i)\b(how\s+old\s+are\s+you|send\s+me\s+a\s+photo|minor)\b",
                ),
                Trigger::new(
                    AgentType::LegalCompliance,
                    r"(?i)\b(pirated|cracked\s+version|illegal\s+download|copyright)\b",
                ),
            ],
            primary_language: "en".to_string(),
        }
    }

    /// Selects the deployed agents relevant to one item.
    ///
    /// Pure over `(item, deployed)`: no side effects, deterministic.
    pub fn route(
        &self,
        item: &ContentItem,
        deployed: &HashMap<AgentType, Arc<AgentInstance>>,
    ) -> HashMap<AgentType, Arc<AgentInstance>> {
        let mut routed = HashMap::new();

        for agent_type in CORE_TYPES {
            if let Some(instance) = deployed.get(&agent_type) {
                routed.insert(agent_type, instance.clone());
            }
        }

        for trigger in &self.triggers {
            if trigger.keywords.is_match(&item.body) {
                if let Some(instance) = deployed.get(&trigger.agent_type) {
                    routed.insert(trigger.agent_type, instance.clone());
                }
            }
        }

        if matches!(item.content_type, ContentType::Image | ContentType::Video) {
            if let Some(instance) = deployed.get(&AgentType::ImageModerator) {
                routed.insert(AgentType::ImageModerator, instance.clone());
            }
        }

        if item.language != self.primary_language {
            if let Some(instance) = deployed.get(&AgentType::MultilingualModerator) {
                routed.insert(AgentType::MultilingualModerator, instance.clone());
            }
        }

        debug!(
            item_id = %item.id,
            routed = routed.len(),
            deployed = deployed.len(),
            "content routed"
        );
        routed
    }
}
