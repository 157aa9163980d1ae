use thiserror::Error;

/// Result type alias for AbuseIPDB operations
pub type Result<T> = std::result::Result<T, AbuseIpError>;

/// Errors that can occur when using the AbuseIPDB API
#[derive(Error, Debug)]
pub enum AbuseIpError {
    /// Authentication failed - missing or rejected API key
    #[error("authentication failed: missing or invalid API key")]
    Unauthorized,

    /// Rate limit exceeded (daily quota or burst)
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed (connection, DNS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AbuseIpError {
    /// Returns true if the service answered and rejected the request,
    /// as opposed to the request never completing
    #[must_use]
    pub const fn is_service_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::RateLimited { .. } | Self::Api { .. }
        )
    }

    /// Returns the HTTP status code if the service produced one
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
