//! Approval tiers and the tier matcher.

use governance_primitives::TierId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::condition::GovernanceCondition;
use crate::context::EvaluationContext;
use crate::evaluator::evaluate_conditions;
use crate::payload::GovernanceThresholdsModulePayload;
use crate::requirements::{CommitteeApproval, RoleSignoff};

/// Requirement bundle gated by a condition set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceApprovalTier {
    id: TierId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    conditions: Vec<GovernanceCondition>,
    #[serde(default)]
    required_approvals: Vec<CommitteeApproval>,
    #[serde(default)]
    required_signoffs: Vec<RoleSignoff>,
}

/// Exception severity classes share the tier shape.
pub type ExceptionSeverityClass = GovernanceApprovalTier;

impl GovernanceApprovalTier {
    /// Creates a tier without conditions or requirements.
    #[must_use]
    pub fn new(id: TierId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            conditions: Vec::new(),
            required_approvals: Vec::new(),
            required_signoffs: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a gating condition.
    #[must_use]
    pub fn with_condition(mut self, condition: GovernanceCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Appends a committee approval requirement.
    #[must_use]
    pub fn with_approval(mut self, approval: CommitteeApproval) -> Self {
        self.required_approvals.push(approval);
        self
    }

    /// Appends a sign-off requirement.
    #[must_use]
    pub fn with_signoff(mut self, signoff: RoleSignoff) -> Self {
        self.required_signoffs.push(signoff);
        self
    }

    /// Returns the tier identifier.
    #[must_use]
    pub fn id(&self) -> &TierId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the gating conditions.
    #[must_use]
    pub fn conditions(&self) -> &[GovernanceCondition] {
        &self.conditions
    }

    /// Returns the committee approvals this tier demands.
    #[must_use]
    pub fn required_approvals(&self) -> &[CommitteeApproval] {
        &self.required_approvals
    }

    /// Returns the sign-offs this tier demands.
    #[must_use]
    pub fn required_signoffs(&self) -> &[RoleSignoff] {
        &self.required_signoffs
    }
}

/// A tier whose conditions held, with the conditions that matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredTier {
    tier: GovernanceApprovalTier,
    matched_conditions: Vec<GovernanceCondition>,
}

impl TriggeredTier {
    /// Pairs a tier with the conditions that matched it.
    #[must_use]
    pub fn new(tier: GovernanceApprovalTier, matched_conditions: Vec<GovernanceCondition>) -> Self {
        Self {
            tier,
            matched_conditions,
        }
    }

    /// Returns the triggered tier.
    #[must_use]
    pub fn tier(&self) -> &GovernanceApprovalTier {
        &self.tier
    }

    /// Returns the conditions that held.
    #[must_use]
    pub fn matched_conditions(&self) -> &[GovernanceCondition] {
        &self.matched_conditions
    }
}

/// Returns every approval tier whose conditions hold, in declaration order.
///
/// Several tiers may trigger together; their requirements are merged by
/// [`compute_requirements`](crate::requirements::compute_requirements).
#[must_use]
pub fn evaluate_approval_tiers(
    governance: &GovernanceThresholdsModulePayload,
    context: &EvaluationContext,
) -> Vec<TriggeredTier> {
    governance
        .approval_tiers()
        .iter()
        .filter_map(|tier| {
            let outcome = evaluate_conditions(tier.conditions(), context);
            outcome.matches().then(|| {
                debug!(
                    tier = %tier.id(),
                    matched = outcome.matched_conditions().len(),
                    "approval tier triggered"
                );
                TriggeredTier::new(tier.clone(), outcome.into_matched_conditions())
            })
        })
        .collect()
}
