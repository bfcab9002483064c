//! Client configuration.
//!
//! # Environment Variables
//!
//! - `MYCOOLPAY_PUBLIC_KEY` — Merchant public key (required by [`crate::MyCoolPayClient::from_env`])
//! - `MYCOOLPAY_PRIVATE_KEY` — Merchant private key (required by [`crate::MyCoolPayClient::from_env`])
//! - `MYCOOLPAY_BASE_URL` — Override the API root (default: `https://my-coolpay.com/api/`)
//! - `MYCOOLPAY_TIMEOUT_SECS` — Request timeout in seconds (default: none)

use std::time::Duration;

use mycoolpay::ConfigError;
use url::Url;

use crate::constants::{BASE_URL_ENV, DEFAULT_API_URL, TIMEOUT_ENV, USER_AGENT};

/// Transport settings for [`crate::MyCoolPayClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root; the public key is appended as the next path segment.
    pub base_url: Url,
    /// Optional per-request timeout.
    pub timeout: Option<Duration>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: None,
            user_agent: USER_AGENT.to_owned(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid URL")
}

impl ClientConfig {
    /// Loads overrides from `MYCOOLPAY_BASE_URL` and `MYCOOLPAY_TIMEOUT_SECS`,
    /// falling back to [`ClientConfig::default`] for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVar`] if a variable is set to an
    /// unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(BASE_URL_ENV) {
            config.base_url = parse_base_url(&raw).map_err(|e| ConfigError::InvalidVar {
                name: BASE_URL_ENV,
                reason: e.to_string(),
            })?;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidVar {
                    name: TIMEOUT_ENV,
                    reason: e.to_string(),
                }
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Sets the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets a timeout for all requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Parses a base URL, normalizing it to end with a single trailing slash.
pub(crate) fn parse_base_url(value: &str) -> Result<Url, url::ParseError> {
    let mut normalized = value.trim().trim_end_matches('/').to_owned();
    normalized.push('/');
    Url::parse(&normalized)
}
