//! Governance orchestration: tier matching, aggregation and the hard-breach gate.

use serde_json::Value;
use tracing::{debug, info};

use crate::context::{ActionType, EvaluationContext, flag};
use crate::decision::{ExceptionEvaluationResult, GovernanceEvaluationResult};
use crate::evaluator::evaluate_conditions;
use crate::payload::GovernanceThresholdsModulePayload;
use crate::requirements::{RequirementsBuilder, compute_requirements};
use crate::tiers::evaluate_approval_tiers;

const HARD_BREACH_FLAG: &str = "hardBreach";
const EXCEPTION_DRAFT_FLAG: &str = "hasExceptionDraft";

/// Reason attached to a decision blocked by an undocumented hard breach.
pub const HARD_BREACH_REASON: &str =
    "Unresolved hard risk breach: an exception record must be drafted before a decision can proceed";

/// Evaluates the governance module for a case.
///
/// Every approval tier whose conditions hold contributes to the merged
/// requirements. A `DECISION` whose exception context flags a hard breach
/// without an exception draft is blocked regardless of the tiers.
#[must_use]
pub fn evaluate_governance(
    context: &EvaluationContext,
    governance: &GovernanceThresholdsModulePayload,
) -> GovernanceEvaluationResult {
    let triggered_tiers = evaluate_approval_tiers(governance, context);
    let requirements = compute_requirements(&triggered_tiers);
    let result = GovernanceEvaluationResult::allow(triggered_tiers, requirements);

    if is_hard_breach_blocked(context) {
        info!(action = %context.action_type(), "decision blocked by undocumented hard breach");
        return result.block(HARD_BREACH_REASON);
    }

    result
}

fn is_hard_breach_blocked(context: &EvaluationContext) -> bool {
    let exception = context.exception();
    context.action_type() == ActionType::Decision
        && flag(exception, HARD_BREACH_FLAG)
        && !flag(exception, EXCEPTION_DRAFT_FLAG)
}

/// Classifies an exception against the configured severity classes.
///
/// Classes are tried in declaration order and the first match wins; they are
/// expected to be mutually exclusive. With no match the class is `None` and
/// nothing is required.
#[must_use]
pub fn evaluate_exception_policy(
    exception: &Value,
    governance: &GovernanceThresholdsModulePayload,
) -> ExceptionEvaluationResult {
    let context = EvaluationContext::for_exception(exception.clone());

    let Some(class) = governance
        .exception_policy()
        .exception_severity
        .iter()
        .find(|class| evaluate_conditions(class.conditions(), &context).matches())
    else {
        debug!("exception matched no severity class");
        return ExceptionEvaluationResult::unclassified();
    };

    debug!(severity_class = %class.id(), "exception severity class selected");
    let mut builder = RequirementsBuilder::default();
    builder.add_tier(class);
    ExceptionEvaluationResult::classified(class.clone(), builder.build())
}

/// Returns true when the case needs an exception record.
///
/// Missing or non-numeric `exclusionOverrides` and `hardRiskBreaches` count as zero.
#[must_use]
pub fn is_exception_required(case: &Value) -> bool {
    let count = |key: &str| case.get(key).and_then(Value::as_f64).unwrap_or(0.0);
    count("exclusionOverrides") > 0.0 || count("hardRiskBreaches") > 0.0
}
