//! Error types for cursorweave
//!
//! We use `thiserror` for ergonomic error definitions with automatic
//! Display/Error implementations. Every failure is surfaced to the immediate
//! caller; nothing is swallowed or retried internally, and partial results
//! are never returned.

use thiserror::Error;

/// Result type alias for cursorweave operations
pub type Result<T> = std::result::Result<T, CursorweaveError>;

/// Main error type for cursorweave operations
#[derive(Error, Debug)]
pub enum CursorweaveError {
    /// The completion response was not valid JSON text
    #[error("completion response is not valid JSON: {0}")]
    MalformedInput(String),

    /// The decoded JSON does not match the expected point-array shape
    #[error("completion response failed schema validation: {0}")]
    SchemaValidation(String),

    /// The requested model is not present in the provider's catalog
    #[error("model \"{model}\" is not available on this account")]
    ModelUnavailable { model: String },

    /// The remote call returned a non-success HTTP status
    #[error("completion request failed ({status}): {description}")]
    RemoteService {
        status: u16,
        description: &'static str,
    },

    /// The remote call succeeded but returned no usable content
    #[error("completion request returned no content")]
    EmptyResponse,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport-level failure below the HTTP status level
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors raised while resolving configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration value: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl From<reqwest::Error> for CursorweaveError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
