//! Evaluation results returned to the calling layer.

use serde::Serialize;

use crate::requirements::ConsolidatedRequirements;
use crate::tiers::{ExceptionSeverityClass, TriggeredTier};

/// Outcome of a governance evaluation for a case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceEvaluationResult {
    triggered_tiers: Vec<TriggeredTier>,
    requirements: ConsolidatedRequirements,
    blocked: bool,
    reasons: Vec<String>,
}

impl GovernanceEvaluationResult {
    /// Returns an unblocked result.
    #[must_use]
    pub fn allow(
        triggered_tiers: Vec<TriggeredTier>,
        requirements: ConsolidatedRequirements,
    ) -> Self {
        Self {
            triggered_tiers,
            requirements,
            blocked: false,
            reasons: Vec::new(),
        }
    }

    /// Marks the result as blocked, appending an explanatory reason.
    #[must_use]
    pub fn block(mut self, reason: impl Into<String>) -> Self {
        self.blocked = true;
        self.reasons.push(reason.into());
        self
    }

    /// Returns the tiers that triggered, in declaration order.
    #[must_use]
    pub fn triggered_tiers(&self) -> &[TriggeredTier] {
        &self.triggered_tiers
    }

    /// Returns the merged requirements.
    #[must_use]
    pub fn requirements(&self) -> &ConsolidatedRequirements {
        &self.requirements
    }

    /// Returns true when the action may not proceed.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Returns the human-readable block reasons.
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Returns true when the identified tier triggered.
    #[must_use]
    pub fn triggered(&self, tier_id: &str) -> bool {
        self.triggered_tiers
            .iter()
            .any(|triggered| triggered.tier().id() == tier_id)
    }
}

/// Outcome of classifying an exception.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionEvaluationResult {
    severity_class: Option<ExceptionSeverityClass>,
    requirements: ConsolidatedRequirements,
}

impl ExceptionEvaluationResult {
    /// Result for an exception that matched no severity class.
    #[must_use]
    pub fn unclassified() -> Self {
        Self {
            severity_class: None,
            requirements: ConsolidatedRequirements::empty(),
        }
    }

    pub(crate) fn classified(
        severity_class: ExceptionSeverityClass,
        requirements: ConsolidatedRequirements,
    ) -> Self {
        Self {
            severity_class: Some(severity_class),
            requirements,
        }
    }

    /// Returns the selected severity class, if any.
    #[must_use]
    pub fn severity_class(&self) -> Option<&ExceptionSeverityClass> {
        self.severity_class.as_ref()
    }

    /// Returns the requirements of the selected class.
    #[must_use]
    pub fn requirements(&self) -> &ConsolidatedRequirements {
        &self.requirements
    }
}
