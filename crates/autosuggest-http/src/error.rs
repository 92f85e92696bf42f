//! HTTP source error types

use autosuggest_core::FetchError;
use thiserror::Error;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP source errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// HTTP error status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Response body is not a list of suggestion records
    #[error("Invalid suggestion payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Every attempt failed with a retryable error
    #[error("Retry limit exceeded after {attempts} attempts: {last}")]
    RetryLimitExceeded {
        attempts: u32,
        #[source]
        last: Box<HttpError>,
    },

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),

    /// The request was cancelled by its owner
    #[error("Request cancelled")]
    Cancelled,
}

impl HttpError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::RequestFailed(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            HttpError::HttpStatus { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Cancelled => FetchError::Cancelled,
            HttpError::HttpStatus { status, message } => FetchError::Status {
                status: status.as_u16(),
                message,
            },
            HttpError::Decode(e) => FetchError::Payload(e.to_string()),
            HttpError::RetryLimitExceeded { last, .. } => FetchError::from(*last),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_retryability() {
        let unavailable = HttpError::HttpStatus {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            message: String::new(),
        };
        let limited = HttpError::HttpStatus {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            message: String::new(),
        };
        let missing = HttpError::HttpStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            message: String::new(),
        };

        assert!(unavailable.is_retryable());
        assert!(limited.is_retryable());
        assert!(!missing.is_retryable());
        assert!(!HttpError::Cancelled.is_retryable());
    }

    #[test]
    fn test_conversion_to_fetch_error() {
        let err = HttpError::HttpStatus {
            status: reqwest::StatusCode::BAD_GATEWAY,
            message: "upstream".to_string(),
        };
        assert_eq!(
            FetchError::from(err),
            FetchError::Status {
                status: 502,
                message: "upstream".to_string()
            }
        );

        assert_eq!(FetchError::from(HttpError::Cancelled), FetchError::Cancelled);
        assert!(matches!(
            FetchError::from(HttpError::InvalidUrl("nope".to_string())),
            FetchError::Transport(_)
        ));
    }

    #[test]
    fn test_exhausted_retries_report_last_error() {
        let err = HttpError::RetryLimitExceeded {
            attempts: 3,
            last: Box::new(HttpError::HttpStatus {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                message: "busy".to_string(),
            }),
        };

        assert!(err.to_string().contains("3 attempts"));
        assert!(matches!(
            FetchError::from(err),
            FetchError::Status { status: 503, .. }
        ));
    }

    #[test]
    fn test_decode_error_becomes_payload() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(matches!(
            FetchError::from(HttpError::from(json_err)),
            FetchError::Payload(_)
        ));
    }
}
