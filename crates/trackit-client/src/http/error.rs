/*
[INPUT]:  Error sources (HTTP, API, serialization, auth, session storage)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the TrackIt client
#[derive(Error, Debug)]
pub enum TrackitError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Server rejected the bearer token
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// No token is available for an authenticated endpoint
    #[error("Not signed in, please log in first")]
    NotAuthenticated,

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session file could not be read or written
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackitError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            TrackitError::Http(_) | TrackitError::InvalidResponse(_) => true,
            TrackitError::Api { code, .. } => *code >= 500 || *code == 429,
            _ => false,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            TrackitError::Unauthorized { .. } | TrackitError::NotAuthenticated
        )
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == StatusCode::UNAUTHORIZED {
            return TrackitError::Unauthorized { message };
        }
        TrackitError::Api {
            code: status.as_u16(),
            message,
        }
    }

    /// True when the server reported that the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackitError::Api { code: 404, .. })
    }
}

/// Result type alias for TrackIt operations
pub type Result<T> = std::result::Result<T, TrackitError>;
