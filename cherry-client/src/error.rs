//! Error types for the Spec Generator client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when calling the Spec Generator
///
/// None of these are retried by the client; the caller decides.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be completed (connection refused, timeout, ...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status code
    #[error("protocol error (status {status}): {message}")]
    Protocol {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The response body is not a valid build specification
    #[error("failed to decode build specification: {0}")]
    Decode(String),
}

impl ClientError {
    /// Create a protocol error from status code and message
    pub fn protocol(status: u16, message: impl Into<String>) -> Self {
        Self::Protocol {
            status,
            message: message.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Check if the service reported a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Protocol { status, .. } if *status >= 500)
    }
}
