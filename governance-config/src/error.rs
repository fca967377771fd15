//! Error types for configuration loading.

use std::path::PathBuf;

use serde_json::Error as SerdeError;
use thiserror::Error;

use crate::validate::ConfigIssue;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors emitted while loading a governance module.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The module file could not be read.
    #[error("failed to read governance module `{}`: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Source [`std::io::Error`].
        source: std::io::Error,
    },
    /// The module was not valid JSON or did not match the expected shape.
    #[error("failed to parse governance module: {source}")]
    Parse {
        /// Source [`serde_json::Error`].
        #[from]
        source: SerdeError,
    },
    /// The environment variable naming the module path was not set.
    #[error("environment variable `{name}` is not set")]
    MissingEnv {
        /// Name of the variable.
        name: String,
    },
    /// The module parsed but failed structural validation.
    #[error("governance module has {} invalid entries", issues.len())]
    Invalid {
        /// Every error-severity issue found.
        issues: Vec<ConfigIssue>,
    },
}
