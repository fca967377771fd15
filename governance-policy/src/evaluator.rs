//! Combines condition lists into a single match decision.

use serde::Serialize;

use crate::condition::{ConditionLogic, GovernanceCondition, evaluate_condition};
use crate::context::EvaluationContext;

/// Result of evaluating a condition list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSetOutcome {
    matches: bool,
    matched_conditions: Vec<GovernanceCondition>,
}

impl ConditionSetOutcome {
    /// Returns true when the list as a whole holds.
    #[must_use]
    pub fn matches(&self) -> bool {
        self.matches
    }

    /// Returns every condition that held individually, in declaration order.
    #[must_use]
    pub fn matched_conditions(&self) -> &[GovernanceCondition] {
        &self.matched_conditions
    }

    /// Consumes the outcome and returns the matched conditions.
    #[must_use]
    pub fn into_matched_conditions(self) -> Vec<GovernanceCondition> {
        self.matched_conditions
    }
}

/// Evaluates `conditions` as a left fold.
///
/// The first condition seeds the accumulator. Every later condition is ORed in
/// when it declares `logic: OR` and ANDed in otherwise; there is no grouping or
/// precedence. All conditions are evaluated so `matched_conditions` reports each
/// one that held, even when the overall result is false. An empty list never
/// matches.
#[must_use]
pub fn evaluate_conditions(
    conditions: &[GovernanceCondition],
    context: &EvaluationContext,
) -> ConditionSetOutcome {
    let mut accumulator: Option<bool> = None;
    let mut matched_conditions = Vec::new();

    for condition in conditions {
        let result = evaluate_condition(condition, context);
        if result {
            matched_conditions.push(condition.clone());
        }

        accumulator = Some(match (accumulator, condition.logic()) {
            (None, _) => result,
            (Some(acc), ConditionLogic::Or) => acc || result,
            (Some(acc), ConditionLogic::And) => acc && result,
        });
    }

    ConditionSetOutcome {
        matches: accumulator.unwrap_or(false),
        matched_conditions,
    }
}
