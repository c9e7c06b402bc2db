//! Built-in keyword-heuristic specialist agents.
//!
//! Each specialist scores content against a table of compiled regex
//! patterns with a per-pattern action and confidence. These agents make
//! the coordination pipeline runnable and testable without an external
//! model; LLM-backed agents plug in through the same [`Agent`] trait
//! and the [`crate::agent::Provider`] seam.

use async_trait::async_trait;
use regex::Regex;
use serde_json::json;

use crate::agent::{Agent, AgentContext, AgentType};
use crate::content::{ContentItem, ContentType};
use crate::decision::{Decision, ModAction};
use crate::error::AgentError;

/// One scored pattern in a specialist's rule table.
struct ScoredPattern {
    pattern: Regex,
    action: ModAction,
    confidence: f64,
    description: &'static str,
}

impl ScoredPattern {
    fn new(pattern: &str, action: ModAction, confidence: f64, description: &'static str) -> Self {
        Self {
            // Tables are static; a malformed pattern is a programming error.
            pattern: Regex::new(pattern).unwrap(),
            action,
            confidence,
            description,
        }
    }
}

/// A keyword-scoring moderation agent.
///
/// Matches the content body against its rule table and returns the most
/// severe matching rule's action. With no match it approves with the
/// configured baseline confidence.
pub struct HeuristicAgent {
    agent_type: AgentType,
    description: String,
    capabilities: Vec<String>,
    patterns: Vec<ScoredPattern>,
    /// Confidence reported when no pattern matches.
    clean_confidence: f64,
}

impl HeuristicAgent {
    /// Builds the standard heuristic specialist for an agent type.
    pub fn for_type(agent_type: AgentType) -> Self {
        let (description, capabilities, patterns) = match agent_type {
            AgentType::Guardian => (
                "General safety net scanning for overtly harmful content",
                vec!["threat-detection", "violence-detection"],
                vec![
                    ScoredPattern::new(
                        r"(?i)\b(kill|hurt|attack)\s+(you|him|her|them)\b",
                        ModAction::Remove,
                        0.9,
                        "direct threat of violence",
                    ),
                    ScoredPattern::new(
                        r"(?i)\b(die|death\s+threat)\b",
                        ModAction::Flag,
                        0.7,
                        "violent language",
                    ),
                ],
            ),
            AgentType::ContentQuality => (
                "Scores relevance and signal quality of posts",
                vec!["quality-scoring", "low-effort-detection"],
                vec![
                    ScoredPattern::new(
                        r"(?i)^\W*$",
                        ModAction::Flag,
                        0.6,
                        "empty or symbol-only content",
                    ),
                    ScoredPattern::new(
                        r"[!?.]{10,}",
                        ModAction::Warn,
                        0.6,
                        "excessive punctuation",
                    ),
                ],
            ),
            AgentType::Transparency => (
                "Explains moderation policy context for audit trails",
                vec!["policy-explanation", "audit-trail"],
                vec![ScoredPattern::new(
                    r"(?i)\bwhy\s+was\s+.{0,30}\b(removed|banned)\b",
                    ModAction::Educate,
                    0.6,
                    "moderation-policy question",
                )],
            ),
            AgentType::Harassment => (
                "Detects harassment, abuse and targeted insults",
                vec!["harassment-detection", "abuse-detection"],
                vec![
                    ScoredPattern::new(
                        r"(?i)\b(idiot|loser|pathetic|worthless)\b",
                        ModAction::Warn,
                        0.7,
                        "insulting language",
                    ),
                    ScoredPattern::new(
                        r"(?i)\b(nobody\s+likes\s+you|go\s+away\s+forever)\b",
                        ModAction::Remove,
                        0.85,
                        "targeted harassment",
                    ),
                ],
            ),
            AgentType::Spam => (
                "Detects spam, scams and engagement manipulation",
                vec!["spam-detection", "scam-detection"],
                vec![
                    ScoredPattern::new(
                        r"(?i)\b(buy\s+now|limited\s+offer|click\s+here|free\s+money)\b",
                        ModAction::Remove,
                        0.8,
                        "commercial spam phrase",
                    ),
                    ScoredPattern::new(
                        r"(?i)\b(crypto\s+giveaway|double\s+your)\b",
                        ModAction::Remove,
                        0.9,
                        "scam phrase",
                    ),
                ],
            ),
            AgentType::Misinformation => (
                "Flags common misinformation markers",
                vec!["misinformation-detection"],
                vec![ScoredPattern::new(
                    r"(?i)\b(miracle\s+cure|they\s+don'?t\s+want\s+you\s+to\s+know|proven\s+hoax)\b",
                    ModAction::Flag,
                    0.75,
                    "misinformation marker",
                )],
            ),
            AgentType::PrivacyProtection => (
                "Detects exposure of personal data",
                vec!["pii-detection", "doxxing-detection"],
                vec![
                    ScoredPattern::new(
                        r"\b\d{3}-\d{2}-\d{4}\b",
                        ModAction::Remove,
                        0.95,
                        "SSN-shaped number",
                    ),
                    ScoredPattern::new(
                        r"(?i)\b(home\s+address\s+is|lives\s+at\s+\d)",
                        ModAction::Remove,
                        0.85,
                        "address disclosure",
                    ),
                ],
            ),
            AgentType::LegalCompliance => (
                "Flags content with legal exposure",
                vec!["legal-risk-detection"],
                vec![ScoredPattern::new(
                    r"(?i)\b(pirated|cracked\s+version|illegal\s+download)\b",
                    ModAction::Flag,
                    0.8,
                    "infringement marker",
                )],
            ),
            AgentType::YouthSafety => (
                "Protects minors; routes them to support rather than punishment",
                vec!["minor-safety", "grooming-detection"],
                vec![ScoredPattern::new(
                    r"(?i)\b(how\s+old\s+are\s+you|send\s+me\s+a\s+photo)\b",
                    ModAction::Flag,
                    0.8,
                    "solicitation marker",
                )],
            ),
            AgentType::CrisisManagement => (
                "Detects self-harm and emergency signals",
                vec!["crisis-detection", "support-referral"],
                vec![ScoredPattern::new(
                    r"(?i)\b(want\s+to\s+die|end\s+it\s+all|hurt\s+myself)\b",
                    ModAction::Support,
                    0.9,
                    "self-harm signal",
                )],
            ),
            AgentType::ImageModerator => (
                "Reviews visual content via caption and metadata heuristics",
                vec!["image-review"],
                vec![ScoredPattern::new(
                    r"(?i)\b(gore|explicit|nsfw)\b",
                    ModAction::Flag,
                    0.8,
                    "explicit-content marker",
                )],
            ),
            AgentType::MultilingualModerator => (
                "Covers content outside the community's primary language",
                vec!["language-detection", "cross-language-review"],
                vec![],
            ),
        };

        Self {
            agent_type,
            description: description.to_string(),
            capabilities: capabilities.into_iter().map(String::from).collect(),
            patterns,
            clean_confidence: 0.7,
        }
    }

    /// The type tag of this specialist.
    pub fn agent_type(&self) -> AgentType {
        self.agent_type
    }

    /// Finds the most severe matching rule for a body of text.
    fn best_match(&self, body: &str) -> Option<&ScoredPattern> {
        self.patterns
            .iter()
            .filter(|p| p.pattern.is_match(body))
            .max_by(|a, b| {
                a.action
                    .priority()
                    .cmp(&b.action.priority())
                    .then(a.confidence.total_cmp(&b.confidence))
            })
    }
}

#[async_trait]
impl Agent for HeuristicAgent {
    async fn initialize(&self) -> Result<(), AgentError> {
        // Pattern tables are compiled in the constructor, so startup only
        // validates that the table is usable for this agent's medium.
        if self.agent_type == AgentType::ImageModerator && self.patterns.is_empty() {
            return Err(AgentError::InitializationFailed(
                "image moderator requires at least one caption rule".to_string(),
            ));
        }
        Ok(())
    }

    async fn analyze_content(
        &self,
        item: &ContentItem,
        _trust_score: f64,
        _context: &AgentContext,
    ) -> Result<Decision, AgentError> {
        if self.agent_type == AgentType::ImageModerator
            && item.content_type != ContentType::Image
            && item.content_type != ContentType::Video
        {
            // Non-visual content carries no signal for this specialist.
            return Ok(Decision::approve(0.5, "no visual content to review"));
        }

        match self.best_match(&item.body) {
            Some(rule) => Ok(Decision::new(
                rule.action,
                rule.confidence,
                format!("matched rule: {}", rule.description),
            )
            .with_evidence(json!({
                "rule": rule.description,
                "pattern": rule.pattern.as_str(),
            }))
            .with_metadata("agent", self.agent_type.label())),
            None => Ok(
                Decision::approve(self.clean_confidence, "no rule matched")
                    .with_metadata("agent", self.agent_type.label()),
            ),
        }
    }

    fn capabilities(&self) -> Vec<String> {
        self.capabilities.clone()
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builds agent instances for the registry.
///
/// The registry and failure handler construct agents through this seam,
/// so deployments can swap heuristic agents for LLM-backed ones without
/// touching coordination code.
pub trait AgentFactory: Send + Sync {
    /// Builds a fresh agent of the given type for a community.
    fn build(&self, agent_type: AgentType, community_id: &str) -> Box<dyn Agent>;
}

/// Factory producing the built-in heuristic specialists.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicFactory;

impl AgentFactory for HeuristicFactory {
    fn build(&self, agent_type: AgentType, _community_id: &str) -> Box<dyn Agent> {
        Box::new(HeuristicAgent::for_type(agent_type))
    }
}
