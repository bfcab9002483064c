//! Verification failure kinds and configuration errors.

/// Reason an inbound gateway request was rejected.
///
/// Every variant is terminal: it points at a forged or misrouted request, or
/// at a key mismatch in the merchant's configuration, never at a transient
/// condition. Callers branch on the variant to tell "wrong merchant",
/// "tampered payload" and "untrusted source" apart in their logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum VerificationError {
    /// The callback's `application` does not match the configured public key,
    /// is missing, or the payload is not a key-value mapping.
    #[error("callback application does not match the configured public key")]
    KeyMismatch,

    /// The callback's `signature` is missing or differs from the digest
    /// recomputed with the private key.
    #[error("callback signature does not match the expected digest")]
    BadSignature,

    /// The request did not originate from the gateway's known address.
    #[error("request source address is not a known gateway address")]
    UnknownIp,
}

impl VerificationError {
    /// Stable machine-readable identifier for logs and alerting.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::KeyMismatch => "key_mismatch",
            Self::BadSignature => "bad_signature",
            Self::UnknownIp => "unknown_ip",
        }
    }

    /// Whether the same request could succeed if tried again.
    ///
    /// Always `false`.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

/// Errors raised while reading SDK configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    /// An environment variable is set but its value cannot be used.
    #[error("invalid environment variable {name}: {reason}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
