#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP client for the My-CoolPay payment gateway.
//!
//! Wraps the gateway's merchant REST API (paylinks, payins, payouts, status
//! checks, balance) and exposes the webhook checks from the [`mycoolpay`]
//! core crate on the same client, so one set of credentials drives both.
//!
//! # Modules
//!
//! - [`client`] — [`MyCoolPayClient`], one method per gateway operation
//! - [`config`] — Transport settings and environment loading
//! - [`constants`] — Default URL, header names, environment variable names
//! - [`error`] — HTTP client error types
//! - [`response`] — Decoded gateway responses
//! - [`rest`] — Generic JSON transport
//! - [`types`] — Typed request bodies
//!
//! # Feature Flags
//!
//! - `telemetry` - Instruments requests with `tracing` spans and logs
//!   verification rejections
//!
//! # Example
//!
//! ```rust,no_run
//! use mycoolpay::CallbackPayload;
//! use mycoolpay_http::{ClientError, MyCoolPayClient};
//!
//! fn on_webhook(
//!     client: &MyCoolPayClient,
//!     peer_ip: &str,
//!     body: &str,
//! ) -> Result<(), ClientError> {
//!     client.is_verified_ip(peer_ip)?;
//!     let payload: CallbackPayload = serde_json::from_str(body)
//!         .map_err(|_| mycoolpay::VerificationError::KeyMismatch)?;
//!     client.check_callback_integrity(&payload)?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod response;
pub mod rest;
pub mod types;

pub use client::MyCoolPayClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use response::Response;
pub use rest::RestClient;
