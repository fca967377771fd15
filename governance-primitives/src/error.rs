//! Shared error definitions for governance primitives.

use thiserror::Error;

/// Result alias used throughout the governance crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing governance primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// Identifier failed validation.
    #[error("invalid {kind} id `{id}`: {reason}")]
    InvalidIdentifier {
        /// Kind of identifier being constructed (e.g. `role`).
        kind: &'static str,
        /// The offending identifier string.
        id: String,
        /// Human-readable reason for rejection.
        reason: String,
    },
}
