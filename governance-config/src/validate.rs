//! Structural validation of governance modules.

use std::collections::HashSet;
use std::fmt;

use governance_policy::{
    ContextRoot, FieldPath, GovernanceApprovalTier, GovernanceThresholdsModulePayload,
};
use serde::Serialize;

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// The module must not be used.
    Error,
    /// The module is usable but probably not what the author intended.
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    /// Severity of the finding.
    pub severity: IssueSeverity,
    /// Where in the module the finding applies, e.g. `approvalTiers[T1]`.
    pub location: String,
    /// Human-readable description.
    pub message: String,
}

impl ConfigIssue {
    fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            location: location.into(),
            message: message.into(),
        }
    }

    fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            location: location.into(),
            message: message.into(),
        }
    }

    /// Returns true for error-severity findings.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
        };
        write!(f, "{level} at {}: {}", self.location, self.message)
    }
}

#[derive(Clone, Copy)]
enum Section {
    ApprovalTiers,
    ExceptionSeverity,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Self::ApprovalTiers => "approvalTiers",
            Self::ExceptionSeverity => "exceptionSeverity",
        }
    }
}

/// Checks a module for structural problems.
///
/// Committee and role references are only checked when the module declares
/// committees or roles respectively.
#[must_use]
pub fn validate(payload: &GovernanceThresholdsModulePayload) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let committees: HashSet<&str> = payload.committees().iter().map(|c| c.id.as_str()).collect();
    let roles: HashSet<&str> = payload.roles().iter().map(|r| r.id.as_str()).collect();

    for (section, tiers) in [
        (Section::ApprovalTiers, payload.approval_tiers()),
        (
            Section::ExceptionSeverity,
            payload.exception_policy().exception_severity.as_slice(),
        ),
    ] {
        let mut seen = HashSet::new();
        for tier in tiers {
            let location = format!("{}[{}]", section.label(), tier.id());
            if !seen.insert(tier.id().as_str()) {
                issues.push(ConfigIssue::error(&location, "duplicate id"));
            }
            check_tier(section, tier, &location, &committees, &roles, &mut issues);
        }
    }

    if !roles.is_empty() {
        for role in &payload.conflicts_policy().blocked_roles {
            if !role.is_case_owner() && !roles.contains(role.as_str()) {
                issues.push(ConfigIssue::warning(
                    "conflictsPolicy.blockedRoles",
                    format!("blocked role `{role}` is not declared"),
                ));
            }
        }
    }

    issues
}

fn check_tier(
    section: Section,
    tier: &GovernanceApprovalTier,
    location: &str,
    committees: &HashSet<&str>,
    roles: &HashSet<&str>,
    issues: &mut Vec<ConfigIssue>,
) {
    if tier.conditions().is_empty() {
        issues.push(ConfigIssue::warning(location, "no conditions; it will never trigger"));
    }

    for condition in tier.conditions() {
        let field = condition.field();
        match FieldPath::parse(field) {
            None => issues.push(ConfigIssue::error(
                location,
                format!("field path `{field}` has an unknown root or an empty segment"),
            )),
            Some(path)
                if matches!(section, Section::ExceptionSeverity)
                    && !matches!(path.root(), ContextRoot::Exception | ContextRoot::ActionType) =>
            {
                issues.push(ConfigIssue::warning(
                    location,
                    format!("field path `{field}` is not visible when classifying exceptions"),
                ));
            }
            Some(_) => {}
        }

        if condition.operator().expects_array() && !condition.value().is_array() {
            issues.push(ConfigIssue::error(
                location,
                format!("{} on `{field}` needs an array value", condition.operator()),
            ));
        }
    }

    for approval in tier.required_approvals() {
        let committee = approval.committee_id().as_str();
        if !committees.is_empty() && !committees.contains(committee) {
            issues.push(ConfigIssue::error(
                location,
                format!("committee `{committee}` is not declared"),
            ));
        }
        if approval.min_yes_votes() == 0 {
            issues.push(ConfigIssue::warning(
                location,
                format!("committee `{committee}` requires zero yes votes"),
            ));
        }
    }

    for signoff in tier.required_signoffs() {
        let role = signoff.role_id().as_str();
        if !roles.is_empty() && !roles.contains(role) {
            issues.push(ConfigIssue::error(
                location,
                format!("sign-off role `{role}` is not declared"),
            ));
        }
    }
}
