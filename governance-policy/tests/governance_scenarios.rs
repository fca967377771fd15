use governance_policy::{
    ApprovalTally, ConditionOperator, EvaluationContext, GovernanceCondition,
    GovernanceThresholdsModulePayload, can_participate, check_progress, compute_requirements,
    evaluate_approval_tiers, evaluate_condition, evaluate_conditions, evaluate_exception_policy,
    evaluate_governance, is_exception_required,
};
use governance_primitives::{CommitteeId, RoleId};
use serde_json::{Value, json};

fn governance() -> GovernanceThresholdsModulePayload {
    serde_json::from_str(include_str!("fixtures/governance.json")).expect("fixture")
}

fn decision(case: Value) -> EvaluationContext {
    EvaluationContext::decision().with_case(case)
}

fn triggered_ids(context: &EvaluationContext) -> Vec<String> {
    evaluate_approval_tiers(&governance(), context)
        .iter()
        .map(|triggered| triggered.tier().id().to_string())
        .collect()
}

#[test]
fn standard_commitment_triggers_only_standard_tier() {
    let ctx = decision(json!({
        "proposedCommitment": 1_500_000,
        "exclusionOverrides": 0,
        "hardRiskBreaches": 0
    }));

    let result = evaluate_governance(&ctx, &governance());
    assert_eq!(triggered_ids(&ctx), ["T1"]);
    assert!(!result.is_blocked());
    assert_eq!(
        serde_json::to_value(result.requirements().committee_approvals()).unwrap(),
        json!([{ "committeeId": "IC", "minYesVotes": 3 }])
    );
    assert!(result.requirements().signoffs().is_empty());
}

#[test]
fn large_commitment_triggers_large_tier() {
    let ctx = decision(json!({
        "proposedCommitment": 3_000_000,
        "exclusionOverrides": 0,
        "hardRiskBreaches": 0
    }));

    let result = evaluate_governance(&ctx, &governance());
    assert_eq!(triggered_ids(&ctx), ["T2"]);
    assert_eq!(result.requirements().committee("IC").unwrap().min_yes_votes(), 4);
    assert!(result.requirements().signoff("COMPLIANCE").unwrap().required());
}

#[test]
fn exclusion_override_takes_exception_path() {
    let ctx = decision(json!({
        "proposedCommitment": 1_500_000,
        "exclusionOverrides": 1,
        "hardRiskBreaches": 0
    }));

    let ids = triggered_ids(&ctx);
    assert!(ids.contains(&"T3".to_owned()));
    assert!(!ids.contains(&"T1".to_owned()));
    assert!(is_exception_required(ctx.case().unwrap()));
}

#[test]
fn large_commitment_with_override_unions_requirements() {
    let ctx = decision(json!({
        "proposedCommitment": 3_000_000,
        "exclusionOverrides": 1,
        "hardRiskBreaches": 0
    }));

    let result = evaluate_governance(&ctx, &governance());
    assert_eq!(triggered_ids(&ctx), ["T2", "T3"]);

    let requirements = result.requirements();
    assert_eq!(requirements.committee_approvals().len(), 2);
    assert_eq!(requirements.committee("IC").unwrap().min_yes_votes(), 4);
    assert_eq!(requirements.committee("RC").unwrap().min_yes_votes(), 2);

    assert_eq!(requirements.signoffs().len(), 3);
    for role in ["COMPLIANCE", "LEGAL", "RISK"] {
        assert!(requirements.signoff(role).unwrap().required(), "{role} required");
    }
}

#[test]
fn aggregation_never_weakens_a_tier() {
    let ctx = decision(json!({
        "proposedCommitment": 3_000_000,
        "exclusionOverrides": 2,
        "hardRiskBreaches": 1
    }));

    let triggered = evaluate_approval_tiers(&governance(), &ctx);
    let merged = compute_requirements(&triggered);
    for tier in triggered.iter().map(|t| t.tier()) {
        for approval in tier.required_approvals() {
            let merged_votes = merged
                .committee(approval.committee_id().as_str())
                .unwrap()
                .min_yes_votes();
            assert!(merged_votes >= approval.min_yes_votes());
        }
        for signoff in tier.required_signoffs().iter().filter(|s| s.required()) {
            assert!(merged.signoff(signoff.role_id().as_str()).unwrap().required());
        }
    }
}

#[test]
fn exception_severity_classification() {
    let minor =
        evaluate_exception_policy(&json!({ "hardBreach": false, "count": 1 }), &governance());
    assert_eq!(minor.severity_class().unwrap().name(), "Minor");
    assert_eq!(minor.requirements().committee("IC").unwrap().min_yes_votes(), 3);
    assert_eq!(minor.requirements().signoffs().len(), 1);
    assert!(minor.requirements().signoff("COMPLIANCE").unwrap().required());

    let major =
        evaluate_exception_policy(&json!({ "hardBreach": true, "count": 1 }), &governance());
    assert_eq!(major.severity_class().unwrap().id(), "E2");
    assert_eq!(major.requirements().committee("IC").unwrap().min_yes_votes(), 4);
    assert_eq!(major.requirements().signoffs().len(), 2);
    assert!(major.requirements().signoffs().iter().all(|s| s.required()));
}

#[test]
fn exception_without_breach_flag_is_unclassified() {
    let result = evaluate_exception_policy(&json!({ "count": 1 }), &governance());
    assert!(result.severity_class().is_none());
    assert!(result.requirements().is_empty());
}

#[test]
fn hard_breach_gate() {
    let case = json!({ "proposedCommitment": 1_500_000, "exclusionOverrides": 0 });

    let blocked = evaluate_governance(
        &decision(case.clone()).with_exception(json!({ "hardBreach": true })),
        &governance(),
    );
    assert!(blocked.is_blocked());
    assert!(blocked.reasons().iter().any(|reason| reason.contains("hard")));

    let drafted = evaluate_governance(
        &decision(case).with_exception(json!({ "hardBreach": true, "hasExceptionDraft": true })),
        &governance(),
    );
    assert!(!drafted.is_blocked());
    assert!(drafted.reasons().is_empty());
    assert_eq!(drafted.triggered_tiers(), blocked.triggered_tiers());
}

#[test]
fn conflicted_roles_and_case_owner() {
    let lead = can_participate(&governance(), &[RoleId::new("DEAL_LEAD").unwrap()], false);
    assert!(!lead.can_vote());
    assert!(!lead.can_signoff());
    assert!(lead.reasons().iter().any(|reason| reason.contains("DEAL_LEAD")));

    let owner = can_participate(&governance(), &[RoleId::new("IC_MEMBER").unwrap()], true);
    assert!(!owner.can_vote());
    assert!(owner.reasons().iter().any(|reason| reason.contains("ownership")));
}

#[test]
fn missing_fields_never_match() {
    let ctx = decision(json!({ "stage": "IC_REVIEW" }));
    assert!(triggered_ids(&ctx).is_empty());

    let condition =
        GovernanceCondition::new("program.phase", ConditionOperator::NotEquals, json!("III"));
    assert!(!evaluate_condition(&condition, &ctx));
}

#[test]
fn matched_conditions_survive_and_failure() {
    let ctx = decision(json!({ "proposedCommitment": 1_500_000, "exclusionOverrides": 1 }));
    let governance = governance();
    let tier = &governance.approval_tiers()[0];
    let outcome = evaluate_conditions(tier.conditions(), &ctx);

    assert!(!outcome.matches());
    assert_eq!(outcome.matched_conditions().len(), 1);
    assert_eq!(outcome.matched_conditions()[0].field(), "case.proposedCommitment");
}

#[test]
fn approval_progress_follows_requirements() {
    let ctx = decision(json!({ "proposedCommitment": 3_000_000, "exclusionOverrides": 0 }));
    let result = evaluate_governance(&ctx, &governance());

    let ic = CommitteeId::new("IC").unwrap();
    let tally = ApprovalTally::default().with_yes_votes(ic.clone(), 3);
    let progress = check_progress(result.requirements(), &tally);
    assert!(!progress.is_satisfied());
    assert_eq!(progress.outstanding_approvals()[0].received, 3);
    assert_eq!(progress.outstanding_signoffs(), [RoleId::new("COMPLIANCE").unwrap()]);

    let tally = tally
        .with_yes_votes(ic, 1)
        .with_signoff(RoleId::new("COMPLIANCE").unwrap());
    assert!(check_progress(result.requirements(), &tally).is_satisfied());
}
