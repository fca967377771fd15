//! Errors surfaced when governance modules are fetched from a source.

use thiserror::Error;

/// Errors surfaced by governance sources and services.
#[derive(Debug, Error)]
pub enum GovernanceError {
    /// No governance module is registered under the key.
    #[error("no governance module for `{key}`")]
    ModuleNotFound {
        /// Key the module was requested under.
        key: String,
    },
    /// Backend holding the modules returned an error.
    #[error("governance backend failure: {reason}")]
    Backend {
        /// Human-readable explanation for logging and operators.
        reason: String,
    },
}

impl GovernanceError {
    /// Helper to construct backend errors from string-like values.
    #[must_use]
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend {
            reason: reason.into(),
        }
    }
}

/// Result alias for governance source operations.
pub type GovernanceResult<T> = Result<T, GovernanceError>;
