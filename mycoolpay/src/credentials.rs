//! Merchant credentials.
//!
//! A My-CoolPay merchant account is identified by a public key, which appears
//! in API URLs and in every callback the gateway sends, and authenticated by a
//! private key. The private key is sent only as the `X-PRIVATE-KEY` header of
//! privileged calls and is otherwise used as signing material for callback
//! verification. It is held in a [`SecretString`] so it never shows up in
//! `Debug` output or logs.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::ConfigError;

/// Environment variable holding the merchant public key.
pub const PUBLIC_KEY_ENV: &str = "MYCOOLPAY_PUBLIC_KEY";

/// Environment variable holding the merchant private key.
pub const PRIVATE_KEY_ENV: &str = "MYCOOLPAY_PRIVATE_KEY";

/// A merchant's public/private key pair.
///
/// # Example
///
/// ```rust
/// use mycoolpay::Credentials;
///
/// let credentials = Credentials::new("pk_123", "secret");
/// assert_eq!(credentials.public_key(), "pk_123");
/// assert!(!format!("{credentials:?}").contains("secret"));
/// ```
pub struct Credentials {
    public_key: String,
    private_key: SecretString,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: SecretString::from(private_key.into()),
        }
    }

    /// Reads `MYCOOLPAY_PUBLIC_KEY` and `MYCOOLPAY_PRIVATE_KEY` from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] if either variable is unset, and
    /// [`ConfigError::InvalidVar`] if either is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let public_key = required_var(&lookup, PUBLIC_KEY_ENV)?;
        let private_key = required_var(&lookup, PRIVATE_KEY_ENV)?;
        Ok(Self::new(public_key, private_key))
    }

    /// The merchant public key.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The merchant private key in plain text.
    ///
    /// Only call this where the key is about to be sent to the gateway or
    /// used as signing material.
    #[must_use]
    pub fn expose_private_key(&self) -> &str {
        self.private_key.expose_secret()
    }

    /// Replaces the public key.
    pub fn set_public_key(&mut self, public_key: impl Into<String>) -> &mut Self {
        self.public_key = public_key.into();
        self
    }

    /// Replaces the private key.
    pub fn set_private_key(&mut self, private_key: impl Into<String>) -> &mut Self {
        self.private_key = SecretString::from(private_key.into());
        self
    }
}

fn required_var<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let value = lookup(name).ok_or(ConfigError::MissingVar(name))?;
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidVar {
            name,
            reason: "value is empty".to_owned(),
        });
    }
    Ok(value)
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self::new(self.public_key.clone(), self.expose_private_key().to_owned())
    }
}

// Debug implementation that doesn't expose the private key
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> = vars
            .iter()
            .map(|(k, v)| (*k, (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_debug_hides_private_key() {
        let credentials = Credentials::new("pk_123", "super-secret-value");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("pk_123"));
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn test_setters_replace_keys() {
        let mut credentials = Credentials::new("pk_123", "secret");
        credentials.set_public_key("pk_456").set_private_key("other");
        assert_eq!(credentials.public_key(), "pk_456");
        assert_eq!(credentials.expose_private_key(), "other");
    }

    #[test]
    fn test_clone_keeps_both_keys() {
        let credentials = Credentials::new("pk_123", "secret");
        let cloned = credentials.clone();
        assert_eq!(cloned.public_key(), "pk_123");
        assert_eq!(cloned.expose_private_key(), "secret");
    }

    #[test]
    fn test_from_lookup_reads_both_keys() {
        let lookup = lookup_from(&[(PUBLIC_KEY_ENV, "pk_123"), (PRIVATE_KEY_ENV, "secret")]);
        let credentials = Credentials::from_lookup(lookup).unwrap();
        assert_eq!(credentials.public_key(), "pk_123");
        assert_eq!(credentials.expose_private_key(), "secret");
    }

    #[test]
    fn test_from_lookup_missing_private_key() {
        let lookup = lookup_from(&[(PUBLIC_KEY_ENV, "pk_123")]);
        let err = Credentials::from_lookup(lookup).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(PRIVATE_KEY_ENV));
    }

    #[test]
    fn test_from_lookup_rejects_empty_value() {
        let lookup = lookup_from(&[(PUBLIC_KEY_ENV, " "), (PRIVATE_KEY_ENV, "secret")]);
        let err = Credentials::from_lookup(lookup).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar {
                name: PUBLIC_KEY_ENV,
                ..
            }
        ));
    }
}
