//! # Quorum Core
//!
//! The coordination and ensemble-decision engine for moderation agents.
//!
//! A variable-size pool of independent agents each renders an opinion
//! about one piece of user content; this crate routes the content to
//! the relevant agents, invokes them concurrently with per-agent
//! timeouts, tolerates partial failure, and synthesizes one
//! authoritative decision through weighted voting.
//!
//! ## Pipeline
//!
//! ```text
//! ContentItem
//!     │
//!     ▼
//! ┌────────────┐   ┌─────────────┐   ┌──────────────┐
//! │  Registry  │──▶│   Router    │──▶│ Coordinator  │── N × Agent::analyze
//! │  snapshot  │   │ (core set + │   │  (fan-out,   │
//! └────────────┘   │  triggers)  │   │  timeouts)   │
//!                  └─────────────┘   └──────┬───────┘
//!                                           ▼
//!                  ┌─────────────┐   ┌──────────────┐
//!                  │   Tracker   │◀──│  Aggregator  │──▶ final Decision
//!                  │  (stats)    │   │ (weighted    │
//!                  └─────────────┘   │  voting)     │
//!                                    └──────────────┘
//! ```
//!
//! Failures feed the [`recovery::FailureHandler`], which restarts the
//! agent or takes it out of rotation without disturbing the rest of the
//! pipeline.
//!
//! ## Example
//!
//! ```rust,ignore
//! use quorum_core::{Moderator, ModeratorConfig};
//! use quorum_registry::CommunityProfile;
//! use quorum_agents::ContentItem;
//!
//! let moderator = Moderator::new(ModeratorConfig::default());
//! moderator.onboard_community(&CommunityProfile::new("community-1")).await;
//!
//! let item = ContentItem::text("post-1", "user-1", "community-1", "hello world");
//! let decision = moderator.request_moderation(&item, 0.5).await?;
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod moderator;
pub mod recovery;
pub mod router;

pub use config::{CoordinatorConfig, ModeratorConfig, RecoveryConfig};
pub use coordinator::{CoordinationOutcome, Coordinator};
pub use error::ModerationError;
pub use moderator::Moderator;
pub use recovery::FailureHandler;
pub use router::ContentRouter;

/// Result type for moderation operations.
pub type Result<T> = std::result::Result<T, ModerationError>;
