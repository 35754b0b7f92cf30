//! Identifier types for Dislo entities.
//!
//! Dislo identifies every entity by a positive integer. Wrapping each in its own
//! newtype keeps a `SubscriptionId` from being passed where a `UserId` is expected.
//!
//! # Macro-based ID Types
//!
//! The `numeric_id_type!` macro reduces boilerplate for integer identifier types,
//! ensuring consistent implementation of serialization, parsing, and display traits.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw identifier as it appears on the wire.
///
/// Some Dislo endpoints render identifiers as strings, so both shapes are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

/// Macro to define an integer identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `u64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize` (as integer), `Deserialize` (from integer or decimal string)
/// - `FromStr`, `Display`, `Debug`
/// - `From<u64>`, `Into<u64>`
///
/// # Example
///
/// ```ignore
/// numeric_id_type!(MyId, "A custom identifier type.");
/// let id = MyId::new(42);
/// let parsed: MyId = "42".parse().unwrap();
/// ```
macro_rules! numeric_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create a new identifier from its numeric value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the numeric value.
            #[must_use]
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| IdError::InvalidNumber(s.to_string()))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match RawId::deserialize(deserializer)? {
                    RawId::Number(value) => Ok(Self(value)),
                    RawId::Text(text) => text.parse().map_err(serde::de::Error::custom),
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

numeric_id_type!(UserId, "A Dislo user identifier.");
numeric_id_type!(SubscriptionId, "A subscription identifier.");
numeric_id_type!(BillingEventId, "A billing event identifier.");
numeric_id_type!(FlexibleId, "A flexible billing arrangement identifier.");
numeric_id_type!(AuthTokenId, "An authentication token record identifier.\n\nThis is the database id of the token record, not the opaque token value.");
numeric_id_type!(BillingMethodId, "A billing method identifier.");

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a non-negative decimal integer.
    #[error("invalid numeric identifier: {0:?}")]
    InvalidNumber(String),
}
