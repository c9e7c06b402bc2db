//! Moderation actions and the `Decision` record.
//!
//! A [`Decision`] is produced by a single agent and, with the same shape,
//! by the ensemble aggregator. The symmetry is intentional: aggregate
//! output can flow through the same logging and notification paths as an
//! individual opinion.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A moderation action.
///
/// The first four variants form the core ordered vocabulary every agent
/// understands. The remaining variants are agent-specific extensions
/// (e.g. a youth-safety agent may vote `Support`); the aggregator treats
/// them as members of the same ordered set with the lowest tie-break
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModAction {
    /// Content is acceptable.
    Approve,
    /// Content is acceptable but the author should be cautioned.
    Warn,
    /// Content needs human review.
    Flag,
    /// Content must be taken down.
    Remove,
    /// Offer support resources to the author.
    Support,
    /// Respond with educational material.
    Educate,
    /// Block the author from the community.
    Block,
    /// Surface the content more prominently.
    Promote,
}

impl ModAction {
    /// Tie-break priority: most conservative wins.
    ///
    /// `Remove > Flag > Warn > Approve`; extension actions rank below
    /// the core vocabulary.
    pub fn priority(self) -> u8 {
        match self {
            ModAction::Remove => 4,
            ModAction::Flag => 3,
            ModAction::Warn => 2,
            ModAction::Approve => 1,
            ModAction::Support
            | ModAction::Educate
            | ModAction::Block
            | ModAction::Promote => 0,
        }
    }

    /// The canonical string label for this action.
    pub fn label(self) -> &'static str {
        match self {
            ModAction::Approve => "approve",
            ModAction::Warn => "warn",
            ModAction::Flag => "flag",
            ModAction::Remove => "remove",
            ModAction::Support => "support",
            ModAction::Educate => "educate",
            ModAction::Block => "block",
            ModAction::Promote => "promote",
        }
    }

    /// Parses an action label, normalizing anything unrecognized to
    /// [`ModAction::Flag`].
    ///
    /// Agents are opaque collaborators; an action string the voting
    /// vocabulary does not know must not crash aggregation, so the
    /// fail-safe default is a human-review flag.
    pub fn parse_or_flag(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "approve" => ModAction::Approve,
            "warn" => ModAction::Warn,
            "flag" => ModAction::Flag,
            "remove" => ModAction::Remove,
            "support" => ModAction::Support,
            "educate" => ModAction::Educate,
            "block" => ModAction::Block,
            "promote" => ModAction::Promote,
            _ => ModAction::Flag,
        }
    }

    /// All actions in the fixed vocabulary.
    pub fn all() -> [ModAction; 8] {
        [
            ModAction::Approve,
            ModAction::Warn,
            ModAction::Flag,
            ModAction::Remove,
            ModAction::Support,
            ModAction::Educate,
            ModAction::Block,
            ModAction::Promote,
        ]
    }
}

impl fmt::Display for ModAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A moderation opinion about one piece of content.
///
/// Produced by an agent or by the aggregator. `confidence` is always in
/// `[0, 1]`; constructors clamp out-of-range values rather than panic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// The recommended action.
    pub action: ModAction,
    /// Confidence in the recommendation, 0.0 to 1.0.
    pub confidence: f64,
    /// Human-readable reasoning.
    pub reasoning: String,
    /// Opaque structured payload (matched patterns, scores, ...).
    pub evidence: serde_json::Value,
    /// Optional per-agent metadata.
    pub metadata: BTreeMap<String, String>,
}

impl Decision {
    /// Creates a decision, clamping confidence into `[0, 1]`.
    pub fn new(action: ModAction, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            action,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning: reasoning.into(),
            evidence: serde_json::Value::Null,
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches an evidence payload.
    pub fn with_evidence(mut self, evidence: serde_json::Value) -> Self {
        self.evidence = evidence;
        self
    }

    /// Attaches a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Shorthand for an approval decision.
    pub fn approve(confidence: f64, reasoning: impl Into<String>) -> Self {
        Self::new(ModAction::Approve, confidence, reasoning)
    }

    /// Shorthand for a flag decision.
    pub fn flag(confidence: f64, reasoning: impl Into<String>) -> Self {
        Self::new(ModAction::Flag, confidence, reasoning)
    }

    /// Shorthand for a removal decision.
    pub fn remove(confidence: f64, reasoning: impl Into<String>) -> Self {
        Self::new(ModAction::Remove, confidence, reasoning)
    }
}
