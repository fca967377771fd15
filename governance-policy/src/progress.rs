//! Tracking collected votes and sign-offs against consolidated requirements.

use std::collections::{BTreeSet, HashMap};

use governance_primitives::{CommitteeId, RoleId};
use serde::{Deserialize, Serialize};

use crate::requirements::ConsolidatedRequirements;

/// Votes and sign-offs collected so far for a case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalTally {
    #[serde(default)]
    yes_votes: HashMap<CommitteeId, u32>,
    #[serde(default)]
    signed_off: BTreeSet<RoleId>,
}

impl ApprovalTally {
    /// Records one yes vote from a committee member. Counts saturate at `u32::MAX`.
    pub fn record_yes_vote(&mut self, committee_id: CommitteeId) {
        self.add_yes_votes(committee_id, 1);
    }

    /// Records a sign-off by a role. Repeated sign-offs are idempotent.
    pub fn record_signoff(&mut self, role_id: RoleId) {
        self.signed_off.insert(role_id);
    }

    /// Adds yes votes and returns the updated tally.
    #[must_use]
    pub fn with_yes_votes(mut self, committee_id: CommitteeId, votes: u32) -> Self {
        self.add_yes_votes(committee_id, votes);
        self
    }

    fn add_yes_votes(&mut self, committee_id: CommitteeId, votes: u32) {
        let count = self.yes_votes.entry(committee_id).or_default();
        *count = count.saturating_add(votes);
    }

    /// Adds a sign-off and returns the updated tally.
    #[must_use]
    pub fn with_signoff(mut self, role_id: RoleId) -> Self {
        self.record_signoff(role_id);
        self
    }

    /// Returns the yes votes recorded for a committee.
    #[must_use]
    pub fn yes_votes(&self, committee_id: &str) -> u32 {
        self.yes_votes.get(committee_id).copied().unwrap_or(0)
    }

    /// Returns true when the role has signed off.
    #[must_use]
    pub fn has_signed_off(&self, role_id: &str) -> bool {
        self.signed_off.contains(role_id)
    }
}

/// Committee still short of its required yes votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingApproval {
    /// Committee the votes are expected from.
    pub committee_id: CommitteeId,
    /// Yes votes required.
    pub required: u32,
    /// Yes votes received so far.
    pub received: u32,
}

/// How far a case is from meeting its requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalProgress {
    satisfied: bool,
    outstanding_approvals: Vec<OutstandingApproval>,
    outstanding_signoffs: Vec<RoleId>,
}

impl ApprovalProgress {
    /// Returns true when every committee and required sign-off is satisfied.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    /// Returns committees still short of votes.
    #[must_use]
    pub fn outstanding_approvals(&self) -> &[OutstandingApproval] {
        &self.outstanding_approvals
    }

    /// Returns required sign-offs not yet given.
    #[must_use]
    pub fn outstanding_signoffs(&self) -> &[RoleId] {
        &self.outstanding_signoffs
    }
}

/// Compares a tally against consolidated requirements.
///
/// Optional sign-offs never hold up satisfaction.
#[must_use]
pub fn check_progress(
    requirements: &ConsolidatedRequirements,
    tally: &ApprovalTally,
) -> ApprovalProgress {
    let outstanding_approvals: Vec<OutstandingApproval> = requirements
        .committee_approvals()
        .iter()
        .filter_map(|approval| {
            let received = tally.yes_votes(approval.committee_id().as_str());
            (received < approval.min_yes_votes()).then(|| OutstandingApproval {
                committee_id: approval.committee_id().clone(),
                required: approval.min_yes_votes(),
                received,
            })
        })
        .collect();

    let outstanding_signoffs: Vec<RoleId> = requirements
        .signoffs()
        .iter()
        .filter(|signoff| {
            signoff.required() && !tally.has_signed_off(signoff.role_id().as_str())
        })
        .map(|signoff| signoff.role_id().clone())
        .collect();

    ApprovalProgress {
        satisfied: outstanding_approvals.is_empty() && outstanding_signoffs.is_empty(),
        outstanding_approvals,
        outstanding_signoffs,
    }
}
