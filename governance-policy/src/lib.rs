//! Governance rule engine for approval tiers, exception severity and
//! conflict-of-interest checks.
//!
//! Evaluation is a pure function of an [`EvaluationContext`] and an immutable
//! [`GovernanceThresholdsModulePayload`]. Malformed or missing business data
//! never produces an error: conditions over it simply do not hold.

#![warn(missing_docs, clippy::pedantic)]

pub mod condition;
pub mod context;
pub mod decision;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod integrations;
pub mod participation;
pub mod payload;
pub mod progress;
pub mod requirements;
pub mod tiers;

pub use condition::{ConditionLogic, ConditionOperator, GovernanceCondition, evaluate_condition};
pub use context::{ActionType, ContextRoot, EvaluationContext, FieldPath};
pub use decision::{ExceptionEvaluationResult, GovernanceEvaluationResult};
pub use engine::{
    HARD_BREACH_REASON, evaluate_exception_policy, evaluate_governance, is_exception_required,
};
pub use error::{GovernanceError, GovernanceResult};
pub use evaluator::{ConditionSetOutcome, evaluate_conditions};
pub use integrations::{GovernanceService, GovernanceSource, InMemoryGovernanceSource};
pub use participation::{ParticipationEligibility, can_participate};
pub use payload::{
    ConflictsPolicy, ExceptionPolicy, GovernanceCommittee, GovernanceRole,
    GovernanceThresholdsModulePayload,
};
pub use progress::{ApprovalProgress, ApprovalTally, OutstandingApproval, check_progress};
pub use requirements::{
    CommitteeApproval, ConsolidatedRequirements, RoleSignoff, compute_requirements,
};
pub use tiers::{
    ExceptionSeverityClass, GovernanceApprovalTier, TriggeredTier, evaluate_approval_tiers,
};
