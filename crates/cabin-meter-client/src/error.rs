//! Client error types.

/// Errors that can occur when using the cabin-meter client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The addressed cabin or usage does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A cabin with the same number already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The request broke a validation rule.
    #[error("validation error ({rule}): {message}")]
    Validation {
        /// Name of the failed rule, e.g. `end_date_before_start_date`.
        rule: String,
        /// Server message.
        message: String,
    },

    /// The usage is completed and can no longer be edited.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Server returned any other error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
