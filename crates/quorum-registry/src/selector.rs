//! Deployment selection: which agent types a community needs.

use std::collections::BTreeSet;

use quorum_agents::{AgentType, ContentType};

use crate::profile::{CommunityProfile, RiskLevel, SizeClass};

/// Base preset for small communities: the minimum viable deployment.
const SMALL_PRESET: [AgentType; 5] = [
    AgentType::Guardian,
    AgentType::ContentQuality,
    AgentType::Transparency,
    AgentType::Harassment,
    AgentType::Spam,
];

/// Base preset for medium communities.
const MEDIUM_PRESET: [AgentType; 8] = [
    AgentType::Guardian,
    AgentType::ContentQuality,
    AgentType::Transparency,
    AgentType::Harassment,
    AgentType::Spam,
    AgentType::Misinformation,
    AgentType::PrivacyProtection,
    AgentType::YouthSafety,
];

/// Base preset for large communities: every specialist.
const LARGE_PRESET: [AgentType; 12] = [
    AgentType::Guardian,
    AgentType::ContentQuality,
    AgentType::Transparency,
    AgentType::Harassment,
    AgentType::Spam,
    AgentType::Misinformation,
    AgentType::PrivacyProtection,
    AgentType::YouthSafety,
    AgentType::LegalCompliance,
    AgentType::CrisisManagement,
    AgentType::ImageModerator,
    AgentType::MultilingualModerator,
];

/// Decides which agent types must run for a community.
///
/// Starts from the size-class base preset and applies additive rules.
/// There are no removal rules: once a community qualifies for an agent
/// type this function never drops it; removal is a separate explicit
/// administrative operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeploymentSelector;

impl DeploymentSelector {
    /// Creates a selector.
    pub fn new() -> Self {
        Self
    }

    /// Selects the agent types for a community profile.
    ///
    /// Idempotent: the output is a set, and reapplying the rules to a
    /// profile yields the same set.
    pub fn select(&self, profile: &CommunityProfile) -> BTreeSet<AgentType> {
        let mut selected: BTreeSet<AgentType> = match profile.size {
            SizeClass::Small => SMALL_PRESET.into_iter().collect(),
            SizeClass::Medium => MEDIUM_PRESET.into_iter().collect(),
            SizeClass::Large => LARGE_PRESET.into_iter().collect(),
        };

        if profile.risk == RiskLevel::High {
            selected.insert(AgentType::CrisisManagement);
            selected.insert(AgentType::PrivacyProtection);
        }

        if profile.content_types.contains(&ContentType::Image) {
            selected.insert(AgentType::ImageModerator);
        }

        if profile.languages.len() > 1 {
            selected.insert(AgentType::MultilingualModerator);
        }

        selected
    }
}
