//! Validated platform identifiers.
//!
//! The remote platform issues numeric (snowflake-style) identifiers for both
//! tenants and destinations. Both newtypes enforce the same format at parse
//! time so the registry and dispatcher never carry unvalidated ids.

use serde::{Deserialize, Serialize};

/// Maximum number of digits in a platform identifier.
const MAX_ID_DIGITS: usize = 20;

/// Error returned when a string is not a valid platform identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid platform id {0:?}: expected 1-20 ASCII digits")]
pub struct ParseIdError(pub String);

fn validate(raw: &str) -> Result<(), ParseIdError> {
    if raw.is_empty() || raw.len() > MAX_ID_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseIdError(raw.to_string()));
    }
    Ok(())
}

macro_rules! platform_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                validate(s)?;
                Ok(Self(s.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseIdError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                validate(&s)?;
                Ok(Self(s))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

platform_id!(
    /// The id of an isolated scope (a community/server) with its own
    /// destination configuration.
    TenantId
);

platform_id!(
    /// The id of a delivery target (a channel) within a tenant's scope.
    DestinationId
);
