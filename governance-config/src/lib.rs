//! Configuration management for governance modules.
//!
//! Modules are JSON documents shaped like
//! [`GovernanceThresholdsModulePayload`](governance_policy::GovernanceThresholdsModulePayload).
//! Every loader validates the module before handing it out.

#![warn(missing_docs, clippy::pedantic)]

mod error;
pub mod loader;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{DEFAULT_PATH_VAR, from_env_var, from_json_str, from_path};
pub use validate::{ConfigIssue, IssueSeverity, validate};
