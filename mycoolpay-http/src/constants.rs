//! HTTP-specific constants for the My-CoolPay REST API.

use http::HeaderName;

/// Root of the gateway REST API. The merchant public key is appended as the
/// next path segment.
pub const DEFAULT_API_URL: &str = "https://my-coolpay.com/api/";

/// Header carrying the merchant private key on privileged calls.
pub const PRIVATE_KEY_HEADER: &str = "X-PRIVATE-KEY";

/// [`PRIVATE_KEY_HEADER`] as a typed header name (header names are case-insensitive).
pub const PRIVATE_KEY_HEADER_NAME: HeaderName = HeaderName::from_static("x-private-key");

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("mycoolpay-rs/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding [`DEFAULT_API_URL`].
pub const BASE_URL_ENV: &str = "MYCOOLPAY_BASE_URL";

/// Environment variable holding a request timeout in whole seconds.
pub const TIMEOUT_ENV: &str = "MYCOOLPAY_TIMEOUT_SECS";
