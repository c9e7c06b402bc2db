//! # Quorum Agents
//!
//! The agent capability surface for the quorum moderation engine.
//!
//! A moderation agent is an independent analysis unit: given one content
//! item, the author's trust score, and a per-invocation context, it
//! renders a [`Decision`] with an action, a confidence, reasoning and an
//! opaque evidence payload. The coordination core treats agents as black
//! boxes behind the [`Agent`] trait.
//!
//! This crate also ships keyword-heuristic specialists (one per
//! [`AgentType`]) so the full pipeline runs without an external model;
//! LLM-backed agents implement the same trait and call out through the
//! [`Provider`] seam.

pub mod agent;
pub mod content;
pub mod decision;
pub mod error;
pub mod specialists;

pub use agent::{Agent, AgentContext, AgentType, Provider};
pub use content::{ContentItem, ContentType};
pub use decision::{Decision, ModAction};
pub use error::AgentError;
pub use specialists::{AgentFactory, HeuristicAgent, HeuristicFactory};

/// Result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;
