//! Governance thresholds module: the configuration every evaluation reads.

use governance_primitives::{CommitteeId, RoleId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tiers::{ExceptionSeverityClass, GovernanceApprovalTier};

/// Role declared by the governance module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceRole {
    /// Role identifier referenced by sign-offs and blocked-role lists.
    pub id: RoleId,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Voting body declared by the governance module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceCommittee {
    /// Committee identifier referenced by approval requirements.
    pub id: CommitteeId,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Roles whose holders sit on the committee.
    #[serde(default)]
    pub member_role_ids: Vec<RoleId>,
}

/// Exception handling settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionPolicy {
    /// Whether a breach must be documented as an exception record.
    #[serde(default)]
    pub requires_exception_record: bool,
    /// Severity classes, evaluated first match wins.
    #[serde(default)]
    pub exception_severity: Vec<ExceptionSeverityClass>,
    /// Default validity of an approved exception, in days.
    #[serde(default)]
    pub expiry_default_days: u32,
}

/// Conflict-of-interest settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictsPolicy {
    /// Whether participants must disclose conflicts.
    #[serde(default)]
    pub requires_disclosure: bool,
    /// Whether conflicted participants must recuse.
    #[serde(default)]
    pub recusal_required: bool,
    /// Roles barred from voting and signing off. May hold `CASE_OWNER`.
    #[serde(default)]
    pub blocked_roles: Vec<RoleId>,
}

/// Full governance configuration.
///
/// Immutable input to every evaluation; nothing in this crate mutates it after
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceThresholdsModulePayload {
    #[serde(default)]
    roles: Vec<GovernanceRole>,
    #[serde(default)]
    committees: Vec<GovernanceCommittee>,
    #[serde(default)]
    approval_tiers: Vec<GovernanceApprovalTier>,
    #[serde(default)]
    exception_policy: ExceptionPolicy,
    #[serde(default)]
    conflicts_policy: ConflictsPolicy,
    #[serde(default)]
    audit: Map<String, Value>,
}

impl GovernanceThresholdsModulePayload {
    /// Adds a role declaration.
    #[must_use]
    pub fn with_role(mut self, role: GovernanceRole) -> Self {
        self.roles.push(role);
        self
    }

    /// Adds a committee declaration.
    #[must_use]
    pub fn with_committee(mut self, committee: GovernanceCommittee) -> Self {
        self.committees.push(committee);
        self
    }

    /// Appends an approval tier.
    #[must_use]
    pub fn with_approval_tier(mut self, tier: GovernanceApprovalTier) -> Self {
        self.approval_tiers.push(tier);
        self
    }

    /// Appends an exception severity class.
    #[must_use]
    pub fn with_severity_class(mut self, class: ExceptionSeverityClass) -> Self {
        self.exception_policy.exception_severity.push(class);
        self
    }

    /// Replaces the exception policy.
    #[must_use]
    pub fn with_exception_policy(mut self, policy: ExceptionPolicy) -> Self {
        self.exception_policy = policy;
        self
    }

    /// Replaces the conflicts policy.
    #[must_use]
    pub fn with_conflicts_policy(mut self, policy: ConflictsPolicy) -> Self {
        self.conflicts_policy = policy;
        self
    }

    /// Returns the declared roles.
    #[must_use]
    pub fn roles(&self) -> &[GovernanceRole] {
        &self.roles
    }

    /// Returns the declared committees.
    #[must_use]
    pub fn committees(&self) -> &[GovernanceCommittee] {
        &self.committees
    }

    /// Returns the approval tiers in declaration order.
    #[must_use]
    pub fn approval_tiers(&self) -> &[GovernanceApprovalTier] {
        &self.approval_tiers
    }

    /// Returns the exception policy.
    #[must_use]
    pub fn exception_policy(&self) -> &ExceptionPolicy {
        &self.exception_policy
    }

    /// Returns the conflicts policy.
    #[must_use]
    pub fn conflicts_policy(&self) -> &ConflictsPolicy {
        &self.conflicts_policy
    }

    /// Returns the audit settings, carried through untouched.
    #[must_use]
    pub fn audit(&self) -> &Map<String, Value> {
        &self.audit
    }
}
