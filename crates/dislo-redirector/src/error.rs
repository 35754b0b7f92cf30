//! Error types for redirector configuration and request parsing.

/// Result type for redirector operations.
pub type Result<T> = std::result::Result<T, RedirectorError>;

/// Errors that can occur while configuring actions or building requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedirectorError {
    /// A required action parameter is absent, `null`, or an empty string.
    #[error("{action}: missing parameter \"{parameter}\"")]
    MissingParameter {
        /// The action being configured.
        action: &'static str,
        /// The parameter name.
        parameter: &'static str,
    },

    /// An action parameter is present but unusable.
    #[error("{action}: invalid parameter \"{parameter}\": {message}")]
    InvalidParameter {
        /// The action being configured.
        action: &'static str,
        /// The parameter name.
        parameter: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// A URL could not be parsed.
    #[error("invalid URL {url:?}: {message}")]
    InvalidUrl {
        /// The input that failed to parse.
        url: String,
        /// What the parser reported.
        message: String,
    },
}
