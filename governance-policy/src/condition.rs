//! Declarative conditions and the single-condition evaluator.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::EvaluationContext;

/// Comparison operator applied by a [`GovernanceCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionOperator {
    /// Strict equality.
    Equals,
    /// Strict inequality.
    NotEquals,
    /// Numeric greater-than.
    Gt,
    /// Numeric greater-than-or-equal.
    Gte,
    /// Numeric less-than.
    Lt,
    /// Numeric less-than-or-equal.
    Lte,
    /// Membership in the array operand.
    In,
    /// Non-membership in the array operand.
    NotIn,
    /// Array element containment or string substring.
    Contains,
}

impl ConditionOperator {
    /// Returns the wire label of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "EQUALS",
            Self::NotEquals => "NOT_EQUALS",
            Self::Gt => "GT",
            Self::Gte => "GTE",
            Self::Lt => "LT",
            Self::Lte => "LTE",
            Self::In => "IN",
            Self::NotIn => "NOT_IN",
            Self::Contains => "CONTAINS",
        }
    }

    /// Returns true for operators that expect an array operand.
    #[must_use]
    pub const fn expects_array(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a condition joins the result accumulated from the conditions before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConditionLogic {
    /// Conjunction with the accumulated result.
    #[default]
    And,
    /// Disjunction with the accumulated result.
    Or,
}

/// A single predicate over the evaluation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceCondition {
    field: String,
    operator: ConditionOperator,
    #[serde(default)]
    value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logic: Option<ConditionLogic>,
}

impl GovernanceCondition {
    /// Creates a condition joined with AND.
    #[must_use]
    pub fn new(field: impl Into<String>, operator: ConditionOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
            logic: None,
        }
    }

    /// Marks the condition as OR-joined with the conditions before it.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.logic = Some(ConditionLogic::Or);
        self
    }

    /// Returns the dotted field path.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the operator.
    #[must_use]
    pub fn operator(&self) -> ConditionOperator {
        self.operator
    }

    /// Returns the comparison operand.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the join logic, defaulting to AND.
    #[must_use]
    pub fn logic(&self) -> ConditionLogic {
        self.logic.unwrap_or_default()
    }
}

/// Evaluates one condition against the context.
///
/// Never fails: an unresolved field or an operand of the wrong type yields
/// `false` for every operator, including the negated ones.
#[must_use]
pub fn evaluate_condition(condition: &GovernanceCondition, context: &EvaluationContext) -> bool {
    let Some(actual) = context.resolve(condition.field()) else {
        return false;
    };
    apply(condition.operator(), &actual, condition.value())
}

fn apply(operator: ConditionOperator, actual: &Value, expected: &Value) -> bool {
    match operator {
        ConditionOperator::Equals => strict_equals(actual, expected),
        ConditionOperator::NotEquals => !strict_equals(actual, expected),
        ConditionOperator::Gt => compare_numbers(actual, expected, |a, b| a > b),
        ConditionOperator::Gte => compare_numbers(actual, expected, |a, b| a >= b),
        ConditionOperator::Lt => compare_numbers(actual, expected, |a, b| a < b),
        ConditionOperator::Lte => compare_numbers(actual, expected, |a, b| a <= b),
        ConditionOperator::In => expected
            .as_array()
            .is_some_and(|items| items.iter().any(|item| strict_equals(actual, item))),
        ConditionOperator::NotIn => expected
            .as_array()
            .is_some_and(|items| !items.iter().any(|item| strict_equals(actual, item))),
        ConditionOperator::Contains => match (actual, expected) {
            (Value::Array(items), _) => items.iter().any(|item| strict_equals(item, expected)),
            (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
            _ => false,
        },
    }
}

fn compare_numbers(actual: &Value, expected: &Value, op: impl Fn(f64, f64) -> bool) -> bool {
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => op(a, b),
        _ => false,
    }
}

/// Equality without type coercion. Numbers compare by value regardless of
/// integer or float representation, so `1` equals `1.0`.
pub(crate) fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| strict_equals(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| strict_equals(value, other)))
        }
        _ => left == right,
    }
}
