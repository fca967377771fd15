//! Integration with the stores that hold governance modules.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use governance_primitives::RoleId;
use serde_json::Value;
use tracing::debug;

use crate::context::EvaluationContext;
use crate::decision::{ExceptionEvaluationResult, GovernanceEvaluationResult};
use crate::engine::{evaluate_exception_policy, evaluate_governance};
use crate::error::{GovernanceError, GovernanceResult};
use crate::participation::{ParticipationEligibility, can_participate};
use crate::payload::GovernanceThresholdsModulePayload;

/// Trait implemented by stores holding the active governance module.
///
/// Implementations typically resolve `key` to the governance module of a
/// published baseline.
#[async_trait]
pub trait GovernanceSource: Send + Sync {
    /// Fetches the governance module registered under `key`.
    async fn fetch(&self, key: &str) -> GovernanceResult<Arc<GovernanceThresholdsModulePayload>>;
}

/// In-memory source keyed by module key.
#[derive(Debug, Default)]
pub struct InMemoryGovernanceSource {
    modules: RwLock<HashMap<String, Arc<GovernanceThresholdsModulePayload>>>,
}

impl InMemoryGovernanceSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the module stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal module store lock has been poisoned.
    pub fn insert(&self, key: impl Into<String>, module: GovernanceThresholdsModulePayload) {
        let mut guard = self.modules.write().expect("governance modules poisoned");
        guard.insert(key.into(), Arc::new(module));
    }
}

#[async_trait]
impl GovernanceSource for InMemoryGovernanceSource {
    async fn fetch(&self, key: &str) -> GovernanceResult<Arc<GovernanceThresholdsModulePayload>> {
        let guard = self
            .modules
            .read()
            .map_err(|_| GovernanceError::backend("governance modules poisoned"))?;
        guard
            .get(key)
            .cloned()
            .ok_or_else(|| GovernanceError::ModuleNotFound { key: key.to_owned() })
    }
}

/// Fetches the governance module from a source and evaluates against it.
pub struct GovernanceService<S>
where
    S: GovernanceSource + 'static,
{
    source: Arc<S>,
}

impl<S> Clone for GovernanceService<S>
where
    S: GovernanceSource + 'static,
{
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S> GovernanceService<S>
where
    S: GovernanceSource + 'static,
{
    /// Creates a service backed by the provided source.
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    async fn module(&self, key: &str) -> GovernanceResult<Arc<GovernanceThresholdsModulePayload>> {
        let module = self.source.fetch(key).await?;
        debug!(
            key,
            tiers = module.approval_tiers().len(),
            "governance module fetched"
        );
        Ok(module)
    }

    /// Evaluates a case against the module stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns the source error when the module cannot be fetched.
    pub async fn evaluate(
        &self,
        key: &str,
        context: &EvaluationContext,
    ) -> GovernanceResult<GovernanceEvaluationResult> {
        let module = self.module(key).await?;
        Ok(evaluate_governance(context, &module))
    }

    /// Classifies an exception against the module stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns the source error when the module cannot be fetched.
    pub async fn evaluate_exception(
        &self,
        key: &str,
        exception: &Value,
    ) -> GovernanceResult<ExceptionEvaluationResult> {
        let module = self.module(key).await?;
        Ok(evaluate_exception_policy(exception, &module))
    }

    /// Checks participation eligibility under the module stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns the source error when the module cannot be fetched.
    pub async fn participation(
        &self,
        key: &str,
        role_ids: &[RoleId],
        is_case_owner: bool,
    ) -> GovernanceResult<ParticipationEligibility> {
        let module = self.module(key).await?;
        Ok(can_participate(&module, role_ids, is_case_owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{ConditionOperator, GovernanceCondition};
    use crate::payload::ConflictsPolicy;
    use crate::tiers::GovernanceApprovalTier;
    use governance_primitives::TierId;
    use serde_json::json;

    struct FailingSource;

    #[async_trait]
    impl GovernanceSource for FailingSource {
        async fn fetch(
            &self,
            _key: &str,
        ) -> GovernanceResult<Arc<GovernanceThresholdsModulePayload>> {
            Err(GovernanceError::backend("connection refused"))
        }
    }

    fn module() -> GovernanceThresholdsModulePayload {
        GovernanceThresholdsModulePayload::default()
            .with_approval_tier(
                GovernanceApprovalTier::new(TierId::new("T1").unwrap(), "Any").with_condition(
                    GovernanceCondition::new("case.value", ConditionOperator::Gt, json!(0)),
                ),
            )
            .with_conflicts_policy(ConflictsPolicy {
                blocked_roles: vec![RoleId::new("DEAL_LEAD").unwrap()],
                ..ConflictsPolicy::default()
            })
    }

    fn service() -> GovernanceService<InMemoryGovernanceSource> {
        let source = InMemoryGovernanceSource::new();
        source.insert("baseline-1", module());
        GovernanceService::new(Arc::new(source))
    }

    #[tokio::test]
    async fn service_evaluates_against_fetched_module() {
        let ctx = EvaluationContext::decision().with_case(json!({ "value": 1 }));
        let result = service().evaluate("baseline-1", &ctx).await.unwrap();
        assert!(result.triggered("T1"));

        let eligibility = service()
            .participation("baseline-1", &[RoleId::new("DEAL_LEAD").unwrap()], false)
            .await
            .unwrap();
        assert!(!eligibility.can_vote());

        let exception = service()
            .evaluate_exception("baseline-1", &json!({ "hardBreach": true }))
            .await
            .unwrap();
        assert!(exception.severity_class().is_none());
    }

    #[tokio::test]
    async fn unknown_key_is_reported() {
        let err = service()
            .evaluate("missing", &EvaluationContext::decision())
            .await
            .expect_err("should fail");
        assert!(matches!(err, GovernanceError::ModuleNotFound { ref key } if key == "missing"));
    }

    #[tokio::test]
    async fn backend_errors_propagate() {
        let service = GovernanceService::new(Arc::new(FailingSource));
        let err = service
            .evaluate("any", &EvaluationContext::decision())
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("connection refused"));
    }
}
