//! Loading governance modules from JSON.

use std::fs;
use std::path::Path;

use governance_policy::GovernanceThresholdsModulePayload;
use tracing::{info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::validate::{ConfigIssue, validate};

/// Default environment variable naming the module file.
pub const DEFAULT_PATH_VAR: &str = "GOVERNANCE_MODULE_PATH";

/// Parses and validates a module from a JSON string.
///
/// Warnings are logged; any error-severity finding rejects the module.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed JSON and
/// [`ConfigError::Invalid`] when validation reports errors.
pub fn from_json_str(json: &str) -> ConfigResult<GovernanceThresholdsModulePayload> {
    let payload: GovernanceThresholdsModulePayload = serde_json::from_str(json)?;
    check(payload)
}

/// Reads, parses and validates a module file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
/// errors of [`from_json_str`].
pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<GovernanceThresholdsModulePayload> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let payload = from_json_str(&json)?;
    info!(
        path = %path.display(),
        tiers = payload.approval_tiers().len(),
        "governance module loaded"
    );
    Ok(payload)
}

/// Loads the module whose path is held in the environment variable `name`.
///
/// `lookup` resolves variable names, normally `|name| std::env::var(name).ok()`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnv`] when the variable is unset or empty,
/// otherwise the errors of [`from_path`].
pub fn from_env_var<F>(name: &str, lookup: F) -> ConfigResult<GovernanceThresholdsModulePayload>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(path) if !path.trim().is_empty() => from_path(path.trim()),
        _ => Err(ConfigError::MissingEnv {
            name: name.to_owned(),
        }),
    }
}

fn check(
    payload: GovernanceThresholdsModulePayload,
) -> ConfigResult<GovernanceThresholdsModulePayload> {
    let (errors, warnings): (Vec<ConfigIssue>, Vec<ConfigIssue>) =
        validate(&payload).into_iter().partition(ConfigIssue::is_error);

    for issue in &warnings {
        warn!(location = %issue.location, "{}", issue.message);
    }

    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(ConfigError::Invalid { issues: errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MODULE: &str = r#"{
        "approvalTiers": [{
            "id": "T1",
            "name": "Standard",
            "conditions": [
                { "field": "case.proposedCommitment", "operator": "LTE", "value": 2000000 }
            ],
            "requiredApprovals": [{ "committeeId": "IC", "minYesVotes": 3 }]
        }],
        "conflictsPolicy": { "blockedRoles": ["CASE_OWNER"] }
    }"#;

    fn temp_file(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "governance-module-{}-{}.json",
            std::process::id(),
            contents.len()
        ));
        let mut file = fs::File::create(&path).expect("create");
        file.write_all(contents.as_bytes()).expect("write");
        path
    }

    #[test]
    fn parses_valid_module() {
        let payload = from_json_str(MODULE).expect("module");
        assert_eq!(payload.approval_tiers().len(), 1);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = from_json_str("{ not json").expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_unknown_operator() {
        let err = from_json_str(
            r#"{ "approvalTiers": [{ "id": "T1", "name": "x",
                 "conditions": [{ "field": "case.a", "operator": "MATCHES", "value": 1 }] }] }"#,
        )
        .expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn role_ids_follow_the_constructor_rule() {
        let payload = from_json_str(r#"{ "conflictsPolicy": { "blockedRoles": ["Deal Lead"] } }"#)
            .expect("module");
        assert_eq!(payload.conflicts_policy().blocked_roles[0], "Deal Lead");

        let err = from_json_str(r#"{ "conflictsPolicy": { "blockedRoles": [""] } }"#)
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("invalid role id"));
    }

    #[test]
    fn rejects_invalid_module() {
        let err = from_json_str(
            r#"{ "approvalTiers": [{ "id": "T1", "name": "x",
                 "conditions": [{ "field": "case.a", "operator": "IN", "value": 1 }] }] }"#,
        )
        .expect_err("should fail");
        let ConfigError::Invalid { issues } = err else {
            panic!("expected validation failure");
        };
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn loads_from_path_and_env() {
        let path = temp_file(MODULE);
        assert!(from_path(&path).is_ok());

        let path_string = path.display().to_string();
        let payload = from_env_var(DEFAULT_PATH_VAR, |name| {
            (name == DEFAULT_PATH_VAR).then(|| path_string.clone())
        })
        .expect("module");
        assert_eq!(payload.approval_tiers().len(), 1);

        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_and_env_are_reported() {
        let err = from_path("/nonexistent/governance.json").expect_err("should fail");
        assert!(matches!(err, ConfigError::Io { .. }));

        let err = from_env_var(DEFAULT_PATH_VAR, |_| None).expect_err("should fail");
        assert!(err.to_string().contains(DEFAULT_PATH_VAR));
    }
}
