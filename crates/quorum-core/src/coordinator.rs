//! Concurrent agent fan-out and failure-tolerant fan-in.
//!
//! Every routed agent is invoked concurrently with the same item, trust
//! score and context. Invocations are independent: an error or timeout
//! in one never aborts or delays the others, and a timeout cancels only
//! that agent's in-flight call. Failed invocations are excluded from the
//! result list rather than replaced with synthetic decisions.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, warn};

use quorum_agents::{AgentContext, AgentError, AgentType, ContentItem, Decision};
use quorum_registry::AgentInstance;

/// The fan-in result of one coordination cycle.
#[derive(Debug, Default)]
pub struct CoordinationOutcome {
    /// Successful decisions with their invocation latency.
    pub decisions: Vec<(AgentType, Decision, Duration)>,
    /// Agents whose invocation errored or timed out.
    pub failures: Vec<(AgentType, AgentError)>,
}

impl CoordinationOutcome {
    /// The decisions as (agent type, decision) pairs for aggregation.
    pub fn decision_pairs(&self) -> Vec<(AgentType, Decision)> {
        self.decisions
            .iter()
            .map(|(agent_type, decision, _)| (*agent_type, decision.clone()))
            .collect()
    }
}

/// Fans one content item out to its routed agents.
#[derive(Debug, Clone, Copy)]
pub struct Coordinator {
    agent_timeout: Duration,
}

impl Coordinator {
    /// Creates a coordinator with the given per-agent deadline.
    pub fn new(agent_timeout: Duration) -> Self {
        Self { agent_timeout }
    }

    /// Invokes all routed agents concurrently and collects the results.
    ///
    /// An empty routed set yields an empty outcome; the aggregator
    /// handles that case with its explicit fallback.
    pub async fn coordinate(
        &self,
        item: &ContentItem,
        routed: HashMap<AgentType, Arc<AgentInstance>>,
        trust_score: f64,
        context: &AgentContext,
    ) -> CoordinationOutcome {
        let invocations = routed.into_iter().map(|(agent_type, instance)| {
            let deadline = self.agent_timeout;
            async move {
                let started = Instant::now();
                let result = tokio::time::timeout(
                    deadline,
                    instance.agent.analyze_content(item, trust_score, context),
                )
                .await;
                let elapsed = started.elapsed();

                match result {
                    Ok(Ok(decision)) => (agent_type, Ok((decision, elapsed))),
                    Ok(Err(err)) => (agent_type, Err(err)),
                    Err(_) => (
                        agent_type,
                        Err(AgentError::Timeout(deadline.as_millis() as u64)),
                    ),
                }
            }
        });

        let mut outcome = CoordinationOutcome::default();
        for (agent_type, result) in join_all(invocations).await {
            match result {
                Ok((decision, elapsed)) => {
                    debug!(
                        agent_type = %agent_type,
                        action = %decision.action,
                        latency_ms = elapsed.as_millis() as u64,
                        "agent decision collected"
                    );
                    outcome.decisions.push((agent_type, decision, elapsed));
                }
                Err(err) => {
                    warn!(agent_type = %agent_type, error = %err, "agent invocation failed");
                    outcome.failures.push((agent_type, err));
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quorum_agents::{Agent, ModAction};

    /// Agent with a scripted response, delay, or failure.
    struct ScriptedAgent {
        decision: Option<Decision>,
        delay: Duration,
    }

    impl ScriptedAgent {
        fn deciding(action: ModAction, confidence: f64) -> Self {
            Self {
                decision: Some(Decision::new(action, confidence, "scripted")),
                delay: Duration::ZERO,
            }
        }

        fn failing() -> Self {
            Self {
                decision: None,
                delay: Duration::ZERO,
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                decision: Some(Decision::approve(0.9, "slow")),
                delay,
            }
        }
    }

    #[async_trait]
    impl Agent for ScriptedAgent {
        async fn initialize(&self) -> Result<(), AgentError> {
            Ok(())
        }

        async fn analyze_content(
            &self,
            _item: &ContentItem,
            _trust_score: f64,
            _context: &AgentContext,
        ) -> Result<Decision, AgentError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.decision
                .clone()
                .ok_or_else(|| AgentError::AnalysisFailed("scripted failure".to_string()))
        }

        fn capabilities(&self) -> Vec<String> {
            Vec::new()
        }

        fn description(&self) -> &str {
            "scripted test agent"
        }
    }

    fn instance(agent_type: AgentType, agent: ScriptedAgent) -> Arc<AgentInstance> {
        Arc::new(AgentInstance {
            agent_type,
            community_id: "community-1".to_string(),
            agent: Box::new(agent),
        })
    }

    fn item() -> ContentItem {
        ContentItem::text("c1", "u1", "community-1", "hello")
    }

    fn ctx() -> AgentContext {
        AgentContext::for_community("community-1")
    }

    #[tokio::test]
    async fn test_collects_all_successful_decisions() {
        let routed = HashMap::from([
            (
                AgentType::Guardian,
                instance(AgentType::Guardian, ScriptedAgent::deciding(ModAction::Approve, 0.8)),
            ),
            (
                AgentType::Spam,
                instance(AgentType::Spam, ScriptedAgent::deciding(ModAction::Flag, 0.6)),
            ),
        ]);

        let coordinator = Coordinator::new(Duration::from_secs(1));
        let outcome = coordinator.coordinate(&item(), routed, 0.5, &ctx()).await;

        assert_eq!(outcome.decisions.len(), 2);
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_others() {
        let routed = HashMap::from([
            (
                AgentType::Guardian,
                instance(AgentType::Guardian, ScriptedAgent::deciding(ModAction::Approve, 0.8)),
            ),
            (
                AgentType::Harassment,
                instance(AgentType::Harassment, ScriptedAgent::failing()),
            ),
        ]);

        let coordinator = Coordinator::new(Duration::from_secs(1));
        let outcome = coordinator.coordinate(&item(), routed, 0.5, &ctx()).await;

        assert_eq!(outcome.decisions.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, AgentType::Harassment);
    }

    #[tokio::test]
    async fn test_timeout_is_isolated_to_one_agent() {
        let routed = HashMap::from([
            (
                AgentType::Guardian,
                instance(AgentType::Guardian, ScriptedAgent::deciding(ModAction::Approve, 0.8)),
            ),
            (
                AgentType::Spam,
                instance(AgentType::Spam, ScriptedAgent::slow(Duration::from_secs(5))),
            ),
        ]);

        let coordinator = Coordinator::new(Duration::from_millis(50));
        let outcome = coordinator.coordinate(&item(), routed, 0.5, &ctx()).await;

        assert_eq!(outcome.decisions.len(), 1);
        assert_eq!(outcome.decisions[0].0, AgentType::Guardian);
        assert!(matches!(outcome.failures[0].1, AgentError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_empty_routed_set_yields_empty_outcome() {
        let coordinator = Coordinator::new(Duration::from_secs(1));
        let outcome = coordinator
            .coordinate(&item(), HashMap::new(), 0.5, &ctx())
            .await;

        assert!(outcome.decisions.is_empty());
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn test_no_synthetic_decisions_for_failures() {
        let routed = HashMap::from([(
            AgentType::Guardian,
            instance(AgentType::Guardian, ScriptedAgent::failing()),
        )]);

        let coordinator = Coordinator::new(Duration::from_secs(1));
        let outcome = coordinator.coordinate(&item(), routed, 0.5, &ctx()).await;

        assert!(outcome.decisions.is_empty());
        assert_eq!(outcome.failures.len(), 1);
    }
}
