//! UUID-backed identifiers for users, questions, and answers.
//!
//! Each identifier keeps the parsed UUID alongside the canonical string so
//! adapters can hand it to Diesel or serialise it without re-formatting.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised when parsing identifiers from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// Input was empty.
    #[error("{kind} id must not be empty")]
    Empty {
        /// Entity the identifier belongs to.
        kind: &'static str,
    },
    /// Input was not a canonical UUID.
    #[error("{kind} id must be a valid UUID")]
    Invalid {
        /// Entity the identifier belongs to.
        kind: &'static str,
    },
}

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid, String);

        impl $name {
            /// Parse an identifier from its textual form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdentifierError> {
                let raw = id.as_ref();
                if raw.is_empty() {
                    return Err(IdentifierError::Empty { kind: $kind });
                }
                if raw.trim() != raw {
                    return Err(IdentifierError::Invalid { kind: $kind });
                }
                let parsed =
                    Uuid::parse_str(raw).map_err(|_| IdentifierError::Invalid { kind: $kind })?;
                Ok(Self::from_uuid(parsed))
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self::from_uuid(Uuid::new_v4())
            }

            /// Wrap a UUID read from storage.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid, uuid.to_string())
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.1.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.1
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_identifier!(
    /// Stable user identifier.
    UserId,
    "user"
);
define_identifier!(
    /// Stable question identifier.
    QuestionId,
    "question"
);
define_identifier!(
    /// Stable answer identifier.
    AnswerId,
    "answer"
);
