//! Conflict-of-interest checks on who may vote or sign off.

use governance_primitives::RoleId;
use serde::Serialize;
use tracing::debug;

use crate::payload::GovernanceThresholdsModulePayload;

/// Whether a participant may vote and sign off, with the reasons they may not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationEligibility {
    can_vote: bool,
    can_signoff: bool,
    reasons: Vec<String>,
}

impl ParticipationEligibility {
    /// Returns true when the participant may vote.
    #[must_use]
    pub fn can_vote(&self) -> bool {
        self.can_vote
    }

    /// Returns true when the participant may sign off.
    #[must_use]
    pub fn can_signoff(&self) -> bool {
        self.can_signoff
    }

    /// Returns the reasons participation was restricted.
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }
}

/// Checks a participant's roles against the conflicts policy.
///
/// Holding any blocked role removes both the vote and the sign-off. When the
/// participant owns the case and `CASE_OWNER` is blocked, the vote is removed.
#[must_use]
pub fn can_participate(
    governance: &GovernanceThresholdsModulePayload,
    role_ids: &[RoleId],
    is_case_owner: bool,
) -> ParticipationEligibility {
    let blocked_roles = &governance.conflicts_policy().blocked_roles;
    let mut eligibility = ParticipationEligibility {
        can_vote: true,
        can_signoff: true,
        reasons: Vec::new(),
    };

    for role in role_ids.iter().filter(|role| blocked_roles.contains(role)) {
        eligibility.can_vote = false;
        eligibility.can_signoff = false;
        eligibility.reasons.push(format!(
            "Role {role} is blocked from voting and signing off by the conflicts policy"
        ));
    }

    if is_case_owner && blocked_roles.iter().any(RoleId::is_case_owner) {
        eligibility.can_vote = false;
        eligibility
            .reasons
            .push("Case owner is excluded from voting because of case ownership".to_owned());
    }

    if !eligibility.reasons.is_empty() {
        debug!(reasons = eligibility.reasons.len(), "participation restricted");
    }
    eligibility
}
