//! Error types for the HTTP client.

use http::StatusCode;
use mycoolpay::{ConfigError, VerificationError};

/// Errors that can occur while talking to the gateway.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("base URL cannot be a base: {0}")]
    InvalidBaseUrl(String),
    /// A header value could not be encoded.
    #[error("invalid header value: {context}")]
    InvalidHeader {
        /// Human-readable context.
        context: &'static str,
    },
    /// HTTP transport error.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// JSON deserialization error.
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        /// Human-readable context.
        context: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// Unexpected HTTP status code.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
    /// Failed to read response body.
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// An inbound callback or source address was rejected.
    #[error("verification failed: {0}")]
    Verification(#[from] VerificationError),
}

impl ClientError {
    /// Whether the failure is a transport-level condition worth retrying.
    ///
    /// Timeouts, connection failures and `5xx` responses are retryable;
    /// verification, configuration and `4xx` failures are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { source, .. } => source.is_timeout() || source.is_connect(),
            Self::HttpStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
