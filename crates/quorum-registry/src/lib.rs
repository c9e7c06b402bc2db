//! # Quorum Registry
//!
//! Community onboarding state for the quorum moderation engine:
//!
//! - [`CommunityProfile`] snapshots describe a community's size, risk,
//!   content types and languages;
//! - [`DeploymentSelector`] turns a profile into the set of agent types
//!   that must be running (size-class presets plus additive rules);
//! - [`AgentRegistry`] owns the live [`AgentInstance`]s, enforcing
//!   exactly one instance per (community, agent type).
//!
//! The registry is the only structure mutated from multiple call paths
//! (analysis reads it, deployment and recovery write it); writes
//! serialize per key and reads proceed concurrently against other keys.

pub mod error;
pub mod profile;
pub mod registry;
pub mod selector;

pub use error::RegistryError;
pub use profile::{CommunityProfile, RiskLevel, SizeClass};
pub use registry::{AgentInstance, AgentRegistry};
pub use selector::DeploymentSelector;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
