//! Core shared types for the governance rule engine.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;

/// Error type and result alias shared across the governance crates.
pub use error::{Error, Result};
/// Identifiers for tiers, committees and roles.
pub use ids::{CommitteeId, RoleId, TierId};
