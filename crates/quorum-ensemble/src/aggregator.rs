//! Weighted ensemble voting over agent decisions.
//!
//! Accumulates confidence-weighted votes per action, picks the winner
//! with a conservative tie-break, then applies trust-score adjustment.
//! The algorithm is commutative over its input list, so the result does
//! not depend on agent completion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use quorum_agents::{AgentType, Decision, ModAction};

/// Vote weight for the two broad-mandate core agents.
const CORE_WEIGHT: f64 = 1.2;
/// Vote weight for ordinary specialists.
const DEFAULT_WEIGHT: f64 = 1.0;

/// Accumulated weighted votes per action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteBoard {
    /// Weighted score per action.
    pub scores: BTreeMap<ModAction, f64>,
    /// Number of decisions tallied.
    pub total: usize,
}

impl VoteBoard {
    /// Tallies a list of (agent, decision) pairs.
    pub fn from_decisions(decisions: &[(AgentType, Decision)]) -> Self {
        let mut scores: BTreeMap<ModAction, f64> = BTreeMap::new();
        for (agent_type, decision) in decisions {
            let weight = agent_weight(*agent_type);
            *scores.entry(decision.action).or_insert(0.0) += decision.confidence * weight;
        }
        Self {
            scores,
            total: decisions.len(),
        }
    }

    /// The action with the highest weighted score.
    ///
    /// Ties break by action priority: the most conservative action wins,
    /// extension actions rank lowest.
    pub fn winner(&self) -> Option<ModAction> {
        self.scores
            .iter()
            .max_by(|(a, sa), (b, sb)| {
                sa.total_cmp(sb)
                    .then_with(|| a.priority().cmp(&b.priority()))
            })
            .map(|(action, _)| *action)
    }
}

/// Returns the voting weight for an agent type.
///
/// Guardian and ContentQuality carry a 1.2 weight reflecting their
/// broader mandate; every other agent votes at 1.0.
pub fn agent_weight(agent_type: AgentType) -> f64 {
    match agent_type {
        AgentType::Guardian | AgentType::ContentQuality => CORE_WEIGHT,
        _ => DEFAULT_WEIGHT,
    }
}

/// The weighted-vote ensemble aggregator.
///
/// Synthesizes any number of per-agent decisions into one authoritative
/// [`Decision`] of the same shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnsembleAggregator;

impl EnsembleAggregator {
    /// Creates an aggregator.
    pub fn new() -> Self {
        Self
    }

    /// Aggregates agent decisions into a final decision.
    ///
    /// # Algorithm
    ///
    /// 1. Empty input returns the named fallback
    ///    `{approve, 0.5, "no agent decisions available"}`.
    /// 2. Weighted votes accumulate per action
    ///    (`confidence * agent_weight`).
    /// 3. The winner is the argmax, ties broken conservatively.
    /// 4. Final confidence is the unweighted mean of all confidences.
    /// 5. Trust adjustment runs last: a `remove` for a trusted author
    ///    (trust > 0.8) downgrades to `flag` at 0.9x confidence; an
    ///    `approve` for a low-trust author (trust < 0.3) upgrades to
    ///    `flag` at 0.8x confidence.
    pub fn aggregate(&self, decisions: &[(AgentType, Decision)], trust_score: f64) -> Decision {
        if decisions.is_empty() {
            return Decision::approve(0.5, "no agent decisions available");
        }

        let board = VoteBoard::from_decisions(decisions);
        // Non-empty input guarantees a winner.
        let mut action = board.winner().unwrap_or(ModAction::Flag);

        let mut confidence = decisions
            .iter()
            .map(|(_, d)| d.confidence)
            .sum::<f64>()
            / decisions.len() as f64;

        let reasoning = decisions
            .iter()
            .map(|(agent_type, d)| format!("[{}] {}", agent_type, d.reasoning))
            .collect::<Vec<_>>()
            .join("; ");

        // Trust adjustment applies strictly after the vote. The two
        // rules are mutually exclusive: trust cannot be both >0.8 and <0.3.
        if action == ModAction::Remove && trust_score > 0.8 {
            debug!(trust_score, "downgrading remove to flag for trusted author");
            action = ModAction::Flag;
            confidence *= 0.9;
        } else if action == ModAction::Approve && trust_score < 0.3 {
            debug!(trust_score, "upgrading approve to flag for low-trust author");
            action = ModAction::Flag;
            confidence *= 0.8;
        }

        Decision::new(action, confidence, reasoning)
            .with_evidence(serde_json::json!({
                "votes": board
                    .scores
                    .iter()
                    .map(|(a, s)| (a.label().to_string(), *s))
                    .collect::<BTreeMap<String, f64>>(),
                "contributors": decisions.len(),
            }))
            .with_metadata("aggregator", "weighted-ensemble")
    }
}
