//! Evaluation context and field-path resolution.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of action the evaluation is performed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// A committee decision on a case.
    Decision,
    /// Registration or review of a policy exception.
    Exception,
}

impl ActionType {
    /// Returns the wire label of the action type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decision => "DECISION",
            Self::Exception => "EXCEPTION",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level key a condition field path starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextRoot {
    /// The scalar `actionType` of the context.
    ActionType,
    /// Business attributes of the case.
    Case,
    /// Attributes of the exception under review.
    Exception,
    /// Insurance policy attributes.
    Policy,
    /// Pharma program attributes.
    Program,
}

impl ContextRoot {
    /// Parses the first segment of a field path.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "actionType" => Some(Self::ActionType),
            "case" => Some(Self::Case),
            "exception" => Some(Self::Exception),
            "policy" => Some(Self::Policy),
            "program" => Some(Self::Program),
            _ => None,
        }
    }
}

/// Parsed dotted field path such as `case.proposedCommitment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath<'a> {
    root: ContextRoot,
    segments: Vec<&'a str>,
}

impl<'a> FieldPath<'a> {
    /// Parses a dotted path. Returns `None` for an unknown root or an empty segment.
    #[must_use]
    pub fn parse(path: &'a str) -> Option<Self> {
        let mut parts = path.split('.');
        let root = ContextRoot::from_segment(parts.next()?)?;
        let segments: Vec<&str> = parts.collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return None;
        }
        Some(Self { root, segments })
    }

    /// Returns the root the path starts from.
    #[must_use]
    pub fn root(&self) -> ContextRoot {
        self.root
    }

    /// Returns the segments following the root.
    #[must_use]
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }
}

/// Per-call input describing the business case being evaluated.
///
/// Each root is a loosely typed JSON value; conditions address into it with
/// dotted field paths. Absent roots and absent keys are legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationContext {
    action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    case: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exception: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    policy: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    program: Option<Value>,
}

impl EvaluationContext {
    /// Creates an empty context for the supplied action.
    #[must_use]
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            case: None,
            exception: None,
            policy: None,
            program: None,
        }
    }

    /// Creates an empty context for a decision.
    #[must_use]
    pub fn decision() -> Self {
        Self::new(ActionType::Decision)
    }

    /// Creates a context for exception review wrapping the supplied attributes.
    #[must_use]
    pub fn for_exception(exception: Value) -> Self {
        Self::new(ActionType::Exception).with_exception(exception)
    }

    /// Sets the case attributes.
    #[must_use]
    pub fn with_case(mut self, case: Value) -> Self {
        self.case = Some(case);
        self
    }

    /// Sets the exception attributes.
    #[must_use]
    pub fn with_exception(mut self, exception: Value) -> Self {
        self.exception = Some(exception);
        self
    }

    /// Sets the insurance policy attributes.
    #[must_use]
    pub fn with_policy(mut self, policy: Value) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets the pharma program attributes.
    #[must_use]
    pub fn with_program(mut self, program: Value) -> Self {
        self.program = Some(program);
        self
    }

    /// Returns the action type.
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Returns the case attributes, if any.
    #[must_use]
    pub fn case(&self) -> Option<&Value> {
        self.case.as_ref()
    }

    /// Returns the exception attributes, if any.
    #[must_use]
    pub fn exception(&self) -> Option<&Value> {
        self.exception.as_ref()
    }

    /// Returns the insurance policy attributes, if any.
    #[must_use]
    pub fn policy(&self) -> Option<&Value> {
        self.policy.as_ref()
    }

    /// Returns the pharma program attributes, if any.
    #[must_use]
    pub fn program(&self) -> Option<&Value> {
        self.program.as_ref()
    }

    /// Resolves a dotted field path against the context.
    ///
    /// `None` means the path did not resolve. It is distinct from a present
    /// `null`, `false` or `0`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<Cow<'_, Value>> {
        let path = FieldPath::parse(path)?;
        let root = match path.root() {
            ContextRoot::ActionType => {
                return path
                    .segments()
                    .is_empty()
                    .then(|| Cow::Owned(Value::from(self.action_type.as_str())));
            }
            ContextRoot::Case => self.case.as_ref()?,
            ContextRoot::Exception => self.exception.as_ref()?,
            ContextRoot::Policy => self.policy.as_ref()?,
            ContextRoot::Program => self.program.as_ref()?,
        };

        path.segments()
            .iter()
            .try_fold(root, |current, segment| index(current, segment))
            .map(Cow::Borrowed)
    }
}

fn index<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Returns true when `value` holds the JSON boolean `true` at `key`.
pub(crate) fn flag(value: Option<&Value>, key: &str) -> bool {
    value
        .and_then(|value| value.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> EvaluationContext {
        EvaluationContext::decision()
            .with_case(json!({
                "proposedCommitment": 1_500_000,
                "stage": "IC_REVIEW",
                "flags": { "esg": false },
                "tags": ["core", "growth"],
                "sponsor": null,
            }))
            .with_exception(json!({ "hardBreach": true }))
    }

    #[test]
    fn resolves_nested_keys() {
        let ctx = context();
        assert_eq!(
            ctx.resolve("case.proposedCommitment").as_deref(),
            Some(&json!(1_500_000))
        );
        assert_eq!(ctx.resolve("case.flags.esg").as_deref(), Some(&json!(false)));
        assert_eq!(ctx.resolve("case.tags.1").as_deref(), Some(&json!("growth")));
        assert_eq!(ctx.resolve("actionType").as_deref(), Some(&json!("DECISION")));
    }

    #[test]
    fn present_null_is_distinct_from_missing() {
        let ctx = context();
        assert_eq!(ctx.resolve("case.sponsor").as_deref(), Some(&Value::Null));
        assert!(ctx.resolve("case.missing").is_none());
    }

    #[test]
    fn missing_roots_and_bad_paths_do_not_resolve() {
        let ctx = context();
        assert!(ctx.resolve("policy.limit").is_none());
        assert!(ctx.resolve("unknown.field").is_none());
        assert!(ctx.resolve("case..stage").is_none());
        assert!(ctx.resolve("case.stage.length").is_none());
        assert!(ctx.resolve("actionType.kind").is_none());
        assert!(ctx.resolve("").is_none());
    }

    #[test]
    fn deserializes_wire_shape() {
        let ctx: EvaluationContext = serde_json::from_value(json!({
            "actionType": "EXCEPTION",
            "exception": { "count": 2 }
        }))
        .expect("context");

        assert_eq!(ctx.action_type(), ActionType::Exception);
        assert!(ctx.case().is_none());
        assert_eq!(ctx.resolve("exception.count").as_deref(), Some(&json!(2)));
    }

    #[test]
    fn flag_requires_literal_true() {
        assert!(flag(Some(&json!({ "hardBreach": true })), "hardBreach"));
        assert!(!flag(Some(&json!({ "hardBreach": "true" })), "hardBreach"));
        assert!(!flag(None, "hardBreach"));
    }
}
