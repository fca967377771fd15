//! Governance rule engine facade.
//!
//! Bundles the governance crates behind feature flags so downstream users can
//! leave out configuration loading or logging setup they provide themselves.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared identifiers for convenience.
pub use governance_primitives as primitives;

/// Rule engine: conditions, tiers, requirements and participation.
pub use governance_policy as policy;

/// Module loading and validation (enabled by `config` feature).
#[cfg(feature = "config")]
pub use governance_config as config;

/// Logging setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use governance_telemetry as telemetry;

pub use governance_policy::{
    EvaluationContext, GovernanceThresholdsModulePayload, can_participate,
    evaluate_exception_policy, evaluate_governance, is_exception_required,
};
