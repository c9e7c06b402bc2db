//! Community profiles used for deployment decisions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use quorum_agents::ContentType;

/// Size class of a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    /// Up to a few thousand members.
    Small,
    /// Tens of thousands of members.
    Medium,
    /// Hundreds of thousands of members and up.
    Large,
}

/// Risk level of a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Low-conflict community.
    Low,
    /// Typical community.
    Medium,
    /// History of incidents or sensitive topic area.
    High,
}

/// Immutable snapshot of community metadata.
///
/// Consumed once per deployment decision; a redeployment takes a fresh
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityProfile {
    /// Community identifier.
    pub community_id: String,
    /// Size class.
    pub size: SizeClass,
    /// Risk level.
    pub risk: RiskLevel,
    /// Content types the community allows.
    pub content_types: BTreeSet<ContentType>,
    /// Languages in active use.
    pub languages: BTreeSet<String>,
}

impl CommunityProfile {
    /// Creates a text-only, English, medium/medium profile.
    pub fn new(community_id: impl Into<String>) -> Self {
        Self {
            community_id: community_id.into(),
            size: SizeClass::Medium,
            risk: RiskLevel::Medium,
            content_types: BTreeSet::from([ContentType::Text]),
            languages: BTreeSet::from(["en".to_string()]),
        }
    }

    /// Sets the size class.
    pub fn with_size(mut self, size: SizeClass) -> Self {
        self.size = size;
        self
    }

    /// Sets the risk level.
    pub fn with_risk(mut self, risk: RiskLevel) -> Self {
        self.risk = risk;
        self
    }

    /// Adds an allowed content type.
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_types.insert(content_type);
        self
    }

    /// Adds an active language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.insert(language.into());
        self
    }
}
