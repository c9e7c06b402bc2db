//! # Quorum Core Integration Tests
//!
//! End-to-end tests of the coordination pipeline through the
//! [`Moderator`] facade.
//!
//! ## Property Coverage
//!
//! | Property | Test |
//! |----------|------|
//! | Always-answer contract | `test_failing_agent_never_blocks_decision` |
//! | Failure isolation | `test_failed_agent_leaves_siblings_serving` |
//! | Partial deployment | `test_partial_onboarding_keeps_healthy_agents` |
//! | Trust adjustment | `test_trusted_author_gets_flag_instead_of_remove` |
//! | Deployment presets | `test_small_community_gets_exact_preset` |
//! | Registry miss | `test_unknown_community_is_the_only_error` |

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use quorum_agents::{
    Agent, AgentContext, AgentError, AgentFactory, AgentType, ContentItem, Decision,
    HeuristicFactory, ModAction,
};
use quorum_core::{ModerationError, Moderator, ModeratorConfig, RecoveryConfig};
use quorum_monitor::AgentStatus;
use quorum_registry::{CommunityProfile, RiskLevel, SizeClass};

/// Agent that always errors during analysis (but deploys fine).
struct CrashingAgent;

#[async_trait]
impl Agent for CrashingAgent {
    async fn initialize(&self) -> Result<(), AgentError> {
        Ok(())
    }

    async fn analyze_content(
        &self,
        _item: &ContentItem,
        _trust_score: f64,
        _context: &AgentContext,
    ) -> Result<Decision, AgentError> {
        Err(AgentError::AnalysisFailed("provider down".to_string()))
    }

    fn capabilities(&self) -> Vec<String> {
        Vec::new()
    }

    fn description(&self) -> &str {
        "always-crashing test agent"
    }
}

/// Agent that always votes remove with high confidence.
struct RemovingAgent;

#[async_trait]
impl Agent for RemovingAgent {
    async fn initialize(&self) -> Result<(), AgentError> {
        Ok(())
    }

    async fn analyze_content(
        &self,
        _item: &ContentItem,
        _trust_score: f64,
        _context: &AgentContext,
    ) -> Result<Decision, AgentError> {
        Ok(Decision::remove(0.9, "policy violation"))
    }

    fn capabilities(&self) -> Vec<String> {
        vec!["removal".to_string()]
    }

    fn description(&self) -> &str {
        "always-removing test agent"
    }
}

/// Factory that hands out a crashing guardian and heuristic siblings.
struct CrashingGuardianFactory {
    inner: HeuristicFactory,
}

impl AgentFactory for CrashingGuardianFactory {
    fn build(&self, agent_type: AgentType, community_id: &str) -> Box<dyn Agent> {
        if agent_type == AgentType::Guardian {
            Box::new(CrashingAgent)
        } else {
            self.inner.build(agent_type, community_id)
        }
    }
}

/// Factory that refuses to build one agent type at all.
struct RefusingFactory {
    refused: AgentType,
    inner: HeuristicFactory,
}

struct RefusedAgent;

#[async_trait]
impl Agent for RefusedAgent {
    async fn initialize(&self) -> Result<(), AgentError> {
        Err(AgentError::InitializationFailed("missing credentials".to_string()))
    }

    async fn analyze_content(
        &self,
        _item: &ContentItem,
        _trust_score: f64,
        _context: &AgentContext,
    ) -> Result<Decision, AgentError> {
        unreachable!("refused agent never initializes")
    }

    fn capabilities(&self) -> Vec<String> {
        Vec::new()
    }

    fn description(&self) -> &str {
        "refused"
    }
}

impl AgentFactory for RefusingFactory {
    fn build(&self, agent_type: AgentType, community_id: &str) -> Box<dyn Agent> {
        if agent_type == self.refused {
            Box::new(RefusedAgent)
        } else {
            self.inner.build(agent_type, community_id)
        }
    }
}

/// Factory where every guardian votes remove at 0.9 confidence.
struct RemovingGuardianFactory {
    inner: HeuristicFactory,
}

impl AgentFactory for RemovingGuardianFactory {
    fn build(&self, agent_type: AgentType, community_id: &str) -> Box<dyn Agent> {
        if agent_type == AgentType::Guardian {
            Box::new(RemovingAgent)
        } else {
            self.inner.build(agent_type, community_id)
        }
    }
}

fn small_profile(community_id: &str) -> CommunityProfile {
    CommunityProfile::new(community_id)
        .with_size(SizeClass::Small)
        .with_risk(RiskLevel::Low)
}

/// Recovery disabled so tests observe the raw coordination outcome
/// without background redeploys racing assertions.
fn config_without_recovery() -> ModeratorConfig {
    ModeratorConfig {
        recovery: RecoveryConfig::default().with_auto_recover(false),
        ..ModeratorConfig::default()
    }
}

// =============================================================================
// DEPLOYMENT
// =============================================================================

#[tokio::test]
async fn test_small_community_gets_exact_preset() {
    let moderator = Moderator::new(ModeratorConfig::default());
    let deployed = moderator.onboard_community(&small_profile("small-town")).await;

    assert_eq!(deployed.len(), 5);
    for agent_type in [
        AgentType::Guardian,
        AgentType::ContentQuality,
        AgentType::Transparency,
        AgentType::Harassment,
        AgentType::Spam,
    ] {
        assert!(deployed.contains(&agent_type), "{agent_type}");
    }
}

#[tokio::test]
async fn test_high_risk_community_gets_crisis_coverage() {
    let moderator = Moderator::new(ModeratorConfig::default());
    let profile = small_profile("tense-town").with_risk(RiskLevel::High);
    let deployed = moderator.onboard_community(&profile).await;

    assert!(deployed.contains(&AgentType::CrisisManagement));
    assert!(deployed.contains(&AgentType::PrivacyProtection));
}

#[tokio::test]
async fn test_partial_onboarding_keeps_healthy_agents() {
    let factory = Arc::new(RefusingFactory {
        refused: AgentType::Spam,
        inner: HeuristicFactory,
    });
    let moderator = Moderator::with_factory(ModeratorConfig::default(), factory);
    let deployed = moderator.onboard_community(&small_profile("community-1")).await;

    assert_eq!(deployed.len(), 4);
    assert!(!deployed.contains(&AgentType::Spam));
    assert!(deployed.contains(&AgentType::Guardian));
}

#[tokio::test]
async fn test_redeploy_is_idempotent() {
    let moderator = Moderator::new(ModeratorConfig::default());
    let profile = small_profile("community-1");
    moderator.onboard_community(&profile).await;
    moderator.redeploy_community(&profile).await;

    assert_eq!(moderator.deployed_agents("community-1").len(), 5);
}

// =============================================================================
// MODERATION PIPELINE
// =============================================================================

#[tokio::test]
async fn test_unknown_community_is_the_only_error() {
    let moderator = Moderator::new(ModeratorConfig::default());
    let item = ContentItem::text("c1", "u1", "nowhere", "hello");

    match moderator.request_moderation(&item, 0.5).await {
        Err(ModerationError::NoAgentsDeployed { community_id }) => {
            assert_eq!(community_id, "nowhere");
        }
        other => panic!("expected NoAgentsDeployed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failing_agent_never_blocks_decision() {
    let factory = Arc::new(CrashingGuardianFactory {
        inner: HeuristicFactory,
    });
    let moderator = Moderator::with_factory(config_without_recovery(), factory);
    moderator.onboard_community(&small_profile("community-1")).await;

    // Guardian crashes on every item; the siblings still answer.
    let item = ContentItem::text("c1", "u1", "community-1", "a normal post");
    let decision = moderator.request_moderation(&item, 0.5).await.unwrap();

    assert!(ModAction::all().contains(&decision.action));
    assert!((0.0..=1.0).contains(&decision.confidence));
}

#[tokio::test]
async fn test_failed_agent_leaves_siblings_serving() {
    let factory = Arc::new(CrashingGuardianFactory {
        inner: HeuristicFactory,
    });
    let moderator = Moderator::with_factory(config_without_recovery(), factory);
    moderator.onboard_community(&small_profile("community-1")).await;

    let item = ContentItem::text("c1", "u1", "community-1", "a normal post");
    moderator.request_moderation(&item, 0.5).await.unwrap();

    let performance = moderator.get_performance("community-1");
    // The crashing guardian contributed nothing; the quality agent did.
    assert_eq!(performance[&AgentType::ContentQuality].decisions_made, 1);
    assert_eq!(
        performance.get(&AgentType::Guardian).map(|r| r.decisions_made),
        Some(0)
    );
}

#[tokio::test]
async fn test_trusted_author_gets_flag_instead_of_remove() {
    let factory = Arc::new(RemovingGuardianFactory {
        inner: HeuristicFactory,
    });
    let moderator = Moderator::with_factory(config_without_recovery(), factory);
    // Only the (always-removing) guardian is deployed, so the vote is
    // an uncontested remove at 0.9.
    moderator.deploy_agent("community-1", AgentType::Guardian).await.unwrap();

    let item = ContentItem::text("c1", "trusted-user", "community-1", "borderline post");
    let decision = moderator.request_moderation(&item, 0.9).await.unwrap();

    // Trust adjustment downgrades the winning remove for an
    // established author, at exactly 0.9x confidence.
    assert_eq!(decision.action, ModAction::Flag);
    assert!((decision.confidence - 0.81).abs() < 1e-9);
}

#[tokio::test]
async fn test_low_trust_author_gets_extra_scrutiny() {
    let moderator = Moderator::new(config_without_recovery());
    moderator.onboard_community(&small_profile("community-1")).await;

    let item = ContentItem::text("c1", "new-user", "community-1", "a normal post");
    let decision = moderator.request_moderation(&item, 0.1).await.unwrap();

    assert_eq!(decision.action, ModAction::Flag);
}

#[tokio::test]
async fn test_reasoning_names_contributing_agents() {
    let moderator = Moderator::new(config_without_recovery());
    moderator.onboard_community(&small_profile("community-1")).await;

    let item = ContentItem::text("c1", "u1", "community-1", "a normal post");
    let decision = moderator.request_moderation(&item, 0.5).await.unwrap();

    assert!(decision.reasoning.contains("[guardian]"));
    assert!(decision.reasoning.contains("[content-quality]"));
}

// =============================================================================
// FAILURE RECOVERY
// =============================================================================

#[tokio::test]
async fn test_explicit_recovery_restores_agent() {
    let moderator = Moderator::new(ModeratorConfig::default());
    moderator.onboard_community(&small_profile("community-1")).await;

    let recovered = moderator
        .handle_agent_failure("community-1", AgentType::Guardian)
        .await;

    assert!(recovered);
    let performance = moderator.get_performance("community-1");
    assert_eq!(performance[&AgentType::Guardian].status, AgentStatus::Active);
}

#[tokio::test]
async fn test_unrecoverable_agent_drops_out_of_rotation() {
    /// Factory whose spam agents never initialize again after the first.
    struct OneShotFactory {
        builds: AtomicU32,
    }

    impl AgentFactory for OneShotFactory {
        fn build(&self, agent_type: AgentType, community_id: &str) -> Box<dyn Agent> {
            let n = self.builds.fetch_add(1, Ordering::SeqCst);
            if agent_type == AgentType::Spam && n > 0 {
                Box::new(RefusedAgent)
            } else {
                HeuristicFactory.build(agent_type, community_id)
            }
        }
    }

    let moderator = Moderator::with_factory(
        config_without_recovery(),
        Arc::new(OneShotFactory {
            builds: AtomicU32::new(0),
        }),
    );
    // Deploy only spam so the build counter stays predictable.
    moderator.deploy_agent("community-1", AgentType::Spam).await.unwrap();

    let recovered = moderator
        .handle_agent_failure("community-1", AgentType::Spam)
        .await;

    assert!(!recovered);
    assert!(!moderator.deployed_agents("community-1").contains(&AgentType::Spam));
    let performance = moderator.get_performance("community-1");
    assert_eq!(performance[&AgentType::Spam].status, AgentStatus::Failed);
}
