//! Custom error types for completion operations

use thiserror::Error;

/// Completion-related errors
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Credentials rejected by the endpoint
    #[error("Authentication failed: {status} - {message}")]
    Authentication {
        status: u16,
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Retry after {retry_after:?} seconds")]
    RateLimited {
        retry_after: Option<u64>,
    },

    /// API request failed
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    Network {
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body did not have the expected shape
    #[error("Malformed response: {message}")]
    MalformedResponse {
        message: String,
    },

    /// Response carried no choices
    #[error("Completion returned no choices")]
    EmptyCompletion,

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration source error
    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),
}

impl CompletionError {
    /// Whether the endpoint rejected the credentials
    pub fn is_auth(&self) -> bool {
        matches!(self, CompletionError::Authentication { .. })
    }

    /// Whether a later attempt with the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::RateLimited { .. }
            | CompletionError::Network { .. }
            | CompletionError::Timeout => true,
            CompletionError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CompletionError::Timeout
        } else if err.is_decode() {
            CompletionError::MalformedResponse {
                message: err.to_string(),
            }
        } else {
            CompletionError::Network {
                message: err.to_string(),
            }
        }
    }
}

/// Result type for completion operations
pub type Result<T> = std::result::Result<T, CompletionError>;
