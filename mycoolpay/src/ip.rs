//! Gateway source address allow-list.
//!
//! The gateway delivers webhooks from a single documented address. It is
//! matched textually: no DNS, no CIDR ranges, no normalization of the input.
//! Rotating or adding gateway addresses requires changing the constants below.

use std::net::IpAddr;

use crate::digest::{constant_time_eq, md5_hex};
use crate::error::VerificationError;

/// Textual prefix every gateway address starts with.
pub const GATEWAY_IP_PREFIX: &str = "15.";

/// MD5 of the gateway's source address (`15.236.140.89`), lowercase hex.
pub const GATEWAY_IP_DIGEST: &str = "236b8184a174448a978e10a93480604a";

/// Checks that `ip` is the gateway's webhook source address.
///
/// The prefix is checked before hashing, and the whole string must hash to
/// [`GATEWAY_IP_DIGEST`].
///
/// ```rust
/// use mycoolpay::{VerificationError, verify_source_ip};
///
/// assert_eq!(verify_source_ip("15.236.140.89"), Ok(()));
/// assert_eq!(verify_source_ip("10.0.0.1"), Err(VerificationError::UnknownIp));
/// ```
///
/// # Errors
///
/// Returns [`VerificationError::UnknownIp`] for any other address.
pub fn verify_source_ip(ip: &str) -> Result<(), VerificationError> {
    if ip.starts_with(GATEWAY_IP_PREFIX) && constant_time_eq(&md5_hex(ip), GATEWAY_IP_DIGEST) {
        return Ok(());
    }
    #[cfg(feature = "telemetry")]
    tracing::warn!(
        code = VerificationError::UnknownIp.code(),
        ip,
        "Rejected webhook from unknown address"
    );
    Err(VerificationError::UnknownIp)
}

/// Checks a parsed peer address, using its canonical textual form.
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`, as reported by dual-stack
/// listeners) are checked as their IPv4 address.
///
/// # Errors
///
/// Returns [`VerificationError::UnknownIp`] unless `addr` is the gateway's address.
pub fn verify_source_addr(addr: IpAddr) -> Result<(), VerificationError> {
    verify_source_ip(&addr.to_canonical().to_string())
}
