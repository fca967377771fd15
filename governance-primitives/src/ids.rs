//! Identifier types for tiers, committees and roles.

use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn validate_identifier(kind: &'static str, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidIdentifier {
            kind,
            id: String::new(),
            reason: "identifier cannot be empty".into(),
        });
    }

    Ok(())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier after validating its format.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidIdentifier`] if the supplied identifier is
            /// empty.
            pub fn new(id: impl Into<String>) -> Result<Self> {
                let id = id.into();
                validate_identifier($kind, &id)?;
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifier of an approval tier or exception severity class.
    TierId,
    "tier"
);

string_id!(
    /// Identifier of a voting committee.
    CommitteeId,
    "committee"
);

string_id!(
    /// Identifier of a governance role.
    RoleId,
    "role"
);

impl RoleId {
    /// Pseudo-role naming whoever owns the case under evaluation.
    pub const CASE_OWNER: &'static str = "CASE_OWNER";

    /// Returns the case-owner pseudo-role.
    #[must_use]
    pub fn case_owner() -> Self {
        Self(Self::CASE_OWNER.to_owned())
    }

    /// Returns true when this is the case-owner pseudo-role.
    #[must_use]
    pub fn is_case_owner(&self) -> bool {
        self.0 == Self::CASE_OWNER
    }
}
