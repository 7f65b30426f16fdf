//! Identifiers for learners and curriculum units.
//!
//! Both identifiers are opaque strings. They are validated once, on
//! construction, so an empty id can never reach the progress store.

use serde::{Deserialize, Serialize};

/// Error returned when an identifier fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The identifier was empty or only whitespace.
    #[error("{kind} id must not be empty")]
    Empty {
        /// Which kind of identifier was rejected
        kind: &'static str,
    },
}

fn validate(kind: &'static str, value: String) -> Result<String, IdError> {
    if value.trim().is_empty() {
        return Err(IdError::Empty { kind });
    }
    Ok(value)
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a validated identifier.
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                validate($kind, value.into()).map(Self)
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a learner.
    UserId,
    "user"
);

string_id!(
    /// Identifier of a curriculum unit (chapter, lesson).
    UnitId,
    "unit"
);
