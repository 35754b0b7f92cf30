//! Error types for Dislo working objects.

use crate::ids::IdError;

/// Result type for Dislo decode operations.
pub type Result<T> = std::result::Result<T, DisloError>;

/// Errors that can occur while translating wire payloads.
#[derive(Debug, thiserror::Error)]
pub enum DisloError {
    /// A payload did not have the shape its working object or envelope requires.
    ///
    /// Raised for a missing required key as well as for a key holding a value of the
    /// wrong type. Indicates a client/server contract mismatch and is never retried.
    #[error("cannot decode {object}: {message}")]
    Deserialization {
        /// The working object or envelope being decoded.
        object: &'static str,
        /// What serde reported.
        message: String,
    },

    /// A working object could not be encoded.
    #[error("cannot encode {object}: {message}")]
    Serialization {
        /// The working object being encoded.
        object: &'static str,
        /// What serde reported.
        message: String,
    },

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}

impl DisloError {
    /// Build a deserialization error for `object` from a serde failure.
    #[must_use]
    pub fn deserialization(object: &'static str, source: &serde_json::Error) -> Self {
        Self::Deserialization {
            object,
            message: source.to_string(),
        }
    }

    /// Whether this error came from an unexpected payload shape.
    #[must_use]
    pub const fn is_deserialization(&self) -> bool {
        matches!(self, Self::Deserialization { .. })
    }
}
