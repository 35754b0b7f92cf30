//! Client error types.

use dislo_core::DisloError;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Dislo client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No usable identity: the transport requires an auth token and the user has
    /// none, or the user was deleted from this context.
    #[error("invalid or missing auth token")]
    InvalidToken,

    /// The transport failed to complete a call.
    #[error("transport error in {operation}: {message}")]
    Transport {
        /// Remote operation that failed.
        operation: &'static str,
        /// Error message.
        message: String,
    },

    /// The server response could not be decoded.
    #[error("response error: {0}")]
    Response(#[from] DisloError),
}

impl ClientError {
    /// Build a transport error for `operation`.
    #[must_use]
    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }
}
