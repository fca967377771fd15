//! Committee approval and sign-off requirements and their aggregation.

use std::collections::HashMap;

use governance_primitives::{CommitteeId, RoleId};
use serde::{Deserialize, Serialize};

use crate::tiers::{GovernanceApprovalTier, TriggeredTier};

/// Minimum number of yes votes required from a committee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeApproval {
    committee_id: CommitteeId,
    min_yes_votes: u32,
}

impl CommitteeApproval {
    /// Creates a committee approval requirement.
    #[must_use]
    pub fn new(committee_id: CommitteeId, min_yes_votes: u32) -> Self {
        Self {
            committee_id,
            min_yes_votes,
        }
    }

    /// Returns the committee identifier.
    #[must_use]
    pub fn committee_id(&self) -> &CommitteeId {
        &self.committee_id
    }

    /// Returns the minimum number of yes votes.
    #[must_use]
    pub fn min_yes_votes(&self) -> u32 {
        self.min_yes_votes
    }
}

/// Attestation expected from a role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSignoff {
    role_id: RoleId,
    #[serde(default)]
    required: bool,
}

impl RoleSignoff {
    /// Creates a sign-off entry.
    #[must_use]
    pub fn new(role_id: RoleId, required: bool) -> Self {
        Self { role_id, required }
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn role_id(&self) -> &RoleId {
        &self.role_id
    }

    /// Returns true when the sign-off is mandatory.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }
}

/// Requirements merged across every triggered tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedRequirements {
    committee_approvals: Vec<CommitteeApproval>,
    signoffs: Vec<RoleSignoff>,
}

impl ConsolidatedRequirements {
    /// Returns the empty requirement set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the committee approvals, one per committee.
    #[must_use]
    pub fn committee_approvals(&self) -> &[CommitteeApproval] {
        &self.committee_approvals
    }

    /// Returns the sign-offs, one per role.
    #[must_use]
    pub fn signoffs(&self) -> &[RoleSignoff] {
        &self.signoffs
    }

    /// Looks up the approval requirement for a committee.
    #[must_use]
    pub fn committee(&self, committee_id: &str) -> Option<&CommitteeApproval> {
        self.committee_approvals
            .iter()
            .find(|approval| approval.committee_id == *committee_id)
    }

    /// Looks up the sign-off entry for a role.
    #[must_use]
    pub fn signoff(&self, role_id: &str) -> Option<&RoleSignoff> {
        self.signoffs
            .iter()
            .find(|signoff| signoff.role_id == *role_id)
    }

    /// Returns true when nothing is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committee_approvals.is_empty() && self.signoffs.is_empty()
    }
}

/// Single-pass builder applying "most restrictive wins".
///
/// Output keeps first-appearance order and holds each committee and role once.
#[derive(Debug, Default)]
pub(crate) struct RequirementsBuilder {
    approvals: Vec<CommitteeApproval>,
    approval_index: HashMap<CommitteeId, usize>,
    signoffs: Vec<RoleSignoff>,
    signoff_index: HashMap<RoleId, usize>,
}

impl RequirementsBuilder {
    pub(crate) fn add_tier(&mut self, tier: &GovernanceApprovalTier) {
        for approval in tier.required_approvals() {
            self.add_approval(approval);
        }
        for signoff in tier.required_signoffs() {
            self.add_signoff(signoff);
        }
    }

    fn add_approval(&mut self, approval: &CommitteeApproval) {
        if let Some(&idx) = self.approval_index.get(&approval.committee_id) {
            let existing = &mut self.approvals[idx];
            existing.min_yes_votes = existing.min_yes_votes.max(approval.min_yes_votes);
        } else {
            self.approval_index
                .insert(approval.committee_id.clone(), self.approvals.len());
            self.approvals.push(approval.clone());
        }
    }

    fn add_signoff(&mut self, signoff: &RoleSignoff) {
        if let Some(&idx) = self.signoff_index.get(&signoff.role_id) {
            self.signoffs[idx].required |= signoff.required;
        } else {
            self.signoff_index
                .insert(signoff.role_id.clone(), self.signoffs.len());
            self.signoffs.push(signoff.clone());
        }
    }

    pub(crate) fn build(self) -> ConsolidatedRequirements {
        ConsolidatedRequirements {
            committee_approvals: self.approvals,
            signoffs: self.signoffs,
        }
    }
}

/// Merges the requirements of every triggered tier.
///
/// Committees take the maximum `minYesVotes` across tiers; a role is required
/// when any tier requires it.
#[must_use]
pub fn compute_requirements(triggered_tiers: &[TriggeredTier]) -> ConsolidatedRequirements {
    let mut builder = RequirementsBuilder::default();
    for triggered in triggered_tiers {
        builder.add_tier(triggered.tier());
    }
    builder.build()
}
