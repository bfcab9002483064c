#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the My-CoolPay payment gateway.
//!
//! This crate holds everything a merchant needs to trust an inbound gateway
//! webhook, without doing any I/O itself. The REST client lives in the
//! `mycoolpay-http` crate and builds on the types defined here.
//!
//! # Overview
//!
//! When a transaction changes state, the gateway POSTs a callback to the
//! merchant. Before acting on it the merchant checks two things:
//!
//! - the callback is addressed to this merchant account and carries a valid
//!   signature over its transaction fields ([`verify_callback`]);
//! - the request came from the gateway's known address ([`verify_source_ip`]).
//!
//! Both checks are pure functions and may run in either order.
//!
//! # Modules
//!
//! - [`callback`] - Callback payloads and signature verification
//! - [`credentials`] - Merchant public/private key pair
//! - [`error`] - Verification failure kinds and configuration errors
//! - [`ip`] - Gateway source address allow-list
//!
//! # Feature Flags
//!
//! - `telemetry` - Emits `tracing` events when a verification is rejected
//!
//! # Example
//!
//! ```rust
//! use mycoolpay::{CallbackPayload, VerificationError, verify_callback};
//!
//! let payload: CallbackPayload = serde_json::from_str(r#"{
//!     "application": "pk_123",
//!     "transaction_ref": "TX1",
//!     "transaction_type": "payin",
//!     "transaction_amount": "100",
//!     "transaction_currency": "XAF",
//!     "transaction_operator": "MTN",
//!     "signature": "ef63e99b47220c800201ed0720a83f7f"
//! }"#).unwrap();
//!
//! assert_eq!(verify_callback(&payload, "pk_123", "secret"), Ok(()));
//! assert_eq!(
//!     verify_callback(&payload, "pk_999", "secret"),
//!     Err(VerificationError::KeyMismatch)
//! );
//! ```

pub mod callback;
pub mod credentials;
mod digest;
pub mod error;
pub mod ip;

pub use callback::{CallbackPayload, SIGNED_FIELDS, verify_callback, verify_callback_value};
pub use credentials::Credentials;
pub use error::{ConfigError, VerificationError};
pub use ip::{verify_source_addr, verify_source_ip};
