//! # Domain Errors

use shared_types::SdkError;
use thiserror::Error;

/// Transport failures. A non-2xx status is not an error at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Dial, DNS or connection reset.
    #[error("Connection failed to {url}: {reason}")]
    Connect {
        /// Target URL
        url: String,
        /// Underlying cause
        reason: String,
    },

    /// Request did not finish within its timeout.
    #[error("Request to {url} timed out")]
    Timeout {
        /// Target URL
        url: String,
    },

    /// Cancelled through the caller's token.
    #[error("Request cancelled")]
    Cancelled,

    /// Response body could not be read.
    #[error("Failed to read body from {url}: {reason}")]
    Body {
        /// Target URL
        url: String,
        /// Underlying cause
        reason: String,
    },

    /// URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client construction failed.
    #[error("Client build failed: {0}")]
    Build(String),
}

impl From<TransportError> for SdkError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled => SdkError::Cancelled,
            TransportError::Body { reason, .. } => SdkError::BadResponse {
                status: 0,
                body: reason,
            },
            TransportError::Build(reason) => SdkError::InvalidConfig(reason),
            other => SdkError::NetworkUnreachable(other.to_string()),
        }
    }
}
