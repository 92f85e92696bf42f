//! Error types for the autocomplete core

use thiserror::Error;

/// Result type for autocomplete operations
pub type AutosuggestResult<T> = std::result::Result<T, AutosuggestError>;

/// Why fetching suggestions did not produce a candidate list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request was superseded or its owner unmounted
    #[error("Request was cancelled")]
    Cancelled,

    /// Network or I/O failure while talking to the source
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The source answered with a non-success status
    #[error("Source responded with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response could not be decoded into suggestion records
    #[error("Malformed suggestion payload: {0}")]
    Payload(String),
}

impl FetchError {
    /// Cancellation is expected and never surfaces as a failure
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Payload(err.to_string())
    }
}

/// Autocomplete errors
#[derive(Debug, Error)]
pub enum AutosuggestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Autocomplete controller has shut down")]
    ControllerClosed,
}
