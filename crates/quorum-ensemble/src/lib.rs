//! # Quorum Ensemble
//!
//! Weighted-vote aggregation of moderation agent decisions.
//!
//! Multiple independent agents each render an opinion about one content
//! item; the [`EnsembleAggregator`] synthesizes those opinions into one
//! authoritative [`quorum_agents::Decision`]:
//!
//! - votes accumulate per action as `confidence * weight`, where the two
//!   broad-mandate core agents (guardian, content-quality) weigh 1.2 and
//!   everything else 1.0;
//! - ties break toward the most conservative action;
//! - the author's trust score adjusts the winner after the vote, never
//!   before.
//!
//! An empty decision list is not an error: it yields the explicit
//! fallback decision so moderation never blocks on infrastructure
//! failure.

pub mod aggregator;

pub use aggregator::{agent_weight, EnsembleAggregator, VoteBoard};
