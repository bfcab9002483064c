//! The My-CoolPay merchant API client.
//!
//! [`MyCoolPayClient`] issues the gateway's payment calls and checks inbound
//! callbacks with the same credentials. Every API URL has the form
//! `{api_root}/{public_key}/{endpoint}`; `payout` and `balance` additionally
//! carry the private key in the `X-PRIVATE-KEY` header.
//!
//! ## Features
//!
//! - Uses `reqwest` for async HTTP requests
//! - Supports optional timeout and headers
//! - Integrates with `tracing` if the `telemetry` feature is enabled

use std::time::Duration;

use http::{HeaderMap, HeaderValue};
use mycoolpay::{CallbackPayload, Credentials, VerificationError};
use serde::Serialize;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::config::ClientConfig;
use crate::constants::PRIVATE_KEY_HEADER_NAME;
use crate::error::ClientError;
use crate::response::Response;
use crate::rest::RestClient;

/// A client for one merchant account.
///
/// # Example
///
/// ```rust,no_run
/// use mycoolpay_http::MyCoolPayClient;
/// use mycoolpay_http::types::{PaylinkRequest, Transaction};
///
/// # async fn run() -> Result<(), mycoolpay_http::ClientError> {
/// let client = MyCoolPayClient::new("pk_123", "secret")?;
/// let request = PaylinkRequest::new(Transaction::new(1000, "XAF").with_reason("Order 42"));
/// let response = client.paylink(&request).await?;
/// println!("{:?}", response.body().get("payment_url"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct MyCoolPayClient {
    credentials: Credentials,
    rest: RestClient,
}

impl MyCoolPayClient {
    /// Creates a client for the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the default base URL cannot be used.
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::with_config(
            Credentials::new(public_key, private_key),
            ClientConfig::default(),
        )
    }

    /// Creates a client with explicit transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the configured base URL
    /// cannot carry path segments.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self, ClientError> {
        let rest = RestClient::with_config(config)?;
        Ok(Self { credentials, rest })
    }

    /// Creates a client from `MYCOOLPAY_*` environment variables.
    ///
    /// See [`crate::config`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the keys are missing or an override
    /// is invalid.
    pub fn from_env() -> Result<Self, ClientError> {
        let credentials = Credentials::from_env()?;
        let config = ClientConfig::from_env()?;
        Self::with_config(credentials, config)
    }

    /// Attaches custom headers to all future requests.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.rest = self.rest.with_headers(headers);
        self
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.rest = self.rest.with_timeout(timeout);
        self
    }

    /// Returns the merchant credentials.
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the merchant public key.
    pub fn public_key(&self) -> &str {
        self.credentials.public_key()
    }

    /// Replaces the public key; later requests use the new account URL.
    pub fn set_public_key(&mut self, public_key: impl Into<String>) -> &mut Self {
        self.credentials.set_public_key(public_key);
        self
    }

    /// Replaces the private key.
    pub fn set_private_key(&mut self, private_key: impl Into<String>) -> &mut Self {
        self.credentials.set_private_key(private_key);
        self
    }

    /// Returns the underlying transport.
    pub const fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Creates a hosted payment link.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP request fails.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mycoolpay.client.paylink", skip_all, err)
    )]
    pub async fn paylink<T>(&self, body: &T) -> Result<Response, ClientError>
    where
        T: Serialize + Sync + ?Sized,
    {
        self.rest
            .post("POST /paylink", &[self.public_key(), "paylink"], body, &HeaderMap::new())
            .await
    }

    /// Starts a direct mobile money collection.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP request fails.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mycoolpay.client.payin", skip_all, err)
    )]
    pub async fn payin<T>(&self, body: &T) -> Result<Response, ClientError>
    where
        T: Serialize + Sync + ?Sized,
    {
        self.rest
            .post("POST /payin", &[self.public_key(), "payin"], body, &HeaderMap::new())
            .await
    }

    /// Confirms a payin with the one-time code sent to the customer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP request fails.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mycoolpay.client.authorize_payin", skip_all, err)
    )]
    pub async fn authorize_payin<T>(&self, body: &T) -> Result<Response, ClientError>
    where
        T: Serialize + Sync + ?Sized,
    {
        self.rest
            .post(
                "POST /payin/authorize",
                &[self.public_key(), "payin", "authorize"],
                body,
                &HeaderMap::new(),
            )
            .await
    }

    /// Sends money from the merchant balance.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if the private key is not a
    /// valid header value, or [`ClientError`] if the HTTP request fails.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mycoolpay.client.payout", skip_all, err)
    )]
    pub async fn payout<T>(&self, body: &T) -> Result<Response, ClientError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let headers = self.private_key_headers()?;
        self.rest
            .post("POST /payout", &[self.public_key(), "payout"], body, &headers)
            .await
    }

    /// Fetches the state of a transaction by its gateway reference.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the HTTP request fails.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mycoolpay.client.check_status", skip(self), err)
    )]
    pub async fn check_status(&self, transaction_ref: &str) -> Result<Response, ClientError> {
        self.rest
            .get(
                "GET /checkStatus",
                &[self.public_key(), "checkStatus", transaction_ref],
                &[],
                &HeaderMap::new(),
            )
            .await
    }

    /// Fetches the merchant balance.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] if the private key is not a
    /// valid header value, or [`ClientError`] if the HTTP request fails.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mycoolpay.client.balance", skip_all, err)
    )]
    pub async fn balance(&self) -> Result<Response, ClientError> {
        let headers = self.private_key_headers()?;
        self.rest
            .get("GET /balance", &[self.public_key(), "balance"], &[], &headers)
            .await
    }

    /// Checks that a callback is addressed to this account and signed with
    /// its private key.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::KeyMismatch`] or
    /// [`VerificationError::BadSignature`]; see [`mycoolpay::verify_callback`].
    pub fn check_callback_integrity(
        &self,
        payload: &CallbackPayload,
    ) -> Result<(), VerificationError> {
        mycoolpay::verify_callback(
            payload,
            self.credentials.public_key(),
            self.credentials.expose_private_key(),
        )
    }

    /// Checks that a webhook came from the gateway's address.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::UnknownIp`]; see [`mycoolpay::verify_source_ip`].
    pub fn is_verified_ip(&self, ip: &str) -> Result<(), VerificationError> {
        mycoolpay::verify_source_ip(ip)
    }

    fn private_key_headers(&self) -> Result<HeaderMap, ClientError> {
        let mut value = HeaderValue::from_str(self.credentials.expose_private_key()).map_err(
            |_| ClientError::InvalidHeader {
                context: "private key is not a valid header value",
            },
        )?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(PRIVATE_KEY_HEADER_NAME, value);
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::constants::PRIVATE_KEY_HEADER;
    use crate::types::{AuthorizePayinRequest, PayinRequest, PayoutRequest, Transaction};

    fn client_for(server: &MockServer) -> MyCoolPayClient {
        let config =
            ClientConfig::default().with_base_url(server.uri().parse::<Url>().unwrap());
        MyCoolPayClient::with_config(Credentials::new("pk_123", "secret"), config).unwrap()
    }

    async fn private_key_sent(server: &MockServer) -> bool {
        let requests = server.received_requests().await.unwrap();
        requests
            .iter()
            .any(|r| r.headers.get(&PRIVATE_KEY_HEADER_NAME).is_some())
    }

    #[tokio::test]
    async fn test_paylink_posts_to_account_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pk_123/paylink"))
            .and(body_json(json!({
                "transaction_amount": 1000,
                "transaction_currency": "XAF",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "transaction_ref": "TX1",
                "payment_url": "https://my-coolpay.com/payment/TX1",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let res = client
            .paylink(&crate::types::PaylinkRequest::new(Transaction::new(1000, "XAF")))
            .await
            .unwrap();
        assert_eq!(res.gateway_status(), Some("success"));
        assert_eq!(res.body()["transaction_ref"], "TX1");
        assert!(!private_key_sent(&server).await);
    }

    #[tokio::test]
    async fn test_payin_has_no_private_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pk_123/payin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let req = PayinRequest::new(Transaction::new(100, "XAF"), "237690000000");
        client.payin(&req).await.unwrap();
        assert!(!private_key_sent(&server).await);
    }

    #[tokio::test]
    async fn test_authorize_payin_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pk_123/payin/authorize"))
            .and(body_json(json!({ "transaction_ref": "TX1", "code": "1234" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let req = AuthorizePayinRequest {
            transaction_ref: "TX1".to_owned(),
            code: "1234".to_owned(),
        };
        client.authorize_payin(&req).await.unwrap();
    }

    #[tokio::test]
    async fn test_payout_sends_private_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pk_123/payout"))
            .and(header(PRIVATE_KEY_HEADER, "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let req = PayoutRequest::new(Transaction::new(100, "XAF"), "237690000000");
        client.payout(&req).await.unwrap();
    }

    #[tokio::test]
    async fn test_balance_sends_private_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pk_123/balance"))
            .and(header(PRIVATE_KEY_HEADER, "secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "success", "balance": 2500 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let res = client.balance().await.unwrap();
        assert_eq!(res.body()["balance"], 2500);
    }

    #[tokio::test]
    async fn test_check_status_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pk_123/checkStatus/TX1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "transaction_status": "SUCCESS",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let res = client.check_status("TX1").await.unwrap();
        assert_eq!(res.body()["transaction_status"], "SUCCESS");
        assert!(!private_key_sent(&server).await);
    }

    #[tokio::test]
    async fn test_set_public_key_changes_account_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pk_456/checkStatus/TX1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = client_for(&server);
        client.set_public_key("pk_456");
        client.check_status("TX1").await.unwrap();
    }

    #[tokio::test]
    async fn test_gateway_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pk_123/payout"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": "error",
                "message": "Invalid private key",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.payout(&json!({})).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::HttpStatus { status, .. } if status == http::StatusCode::UNAUTHORIZED
        ));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_private_key_not_a_header_value() {
        let client = MyCoolPayClient::new("pk_123", "bad\nkey").unwrap();
        assert!(matches!(
            client.private_key_headers(),
            Err(ClientError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_debug_hides_private_key() {
        let client = MyCoolPayClient::new("pk_123", "super-secret-value").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret-value"));
        let headers = client.private_key_headers().unwrap();
        assert!(!format!("{headers:?}").contains("super-secret-value"));
    }

    #[test]
    fn test_check_callback_integrity_uses_client_keys() {
        let client = MyCoolPayClient::new("pk_123", "secret").unwrap();
        let payload: CallbackPayload = serde_json::from_value(json!({
            "application": "pk_123",
            "transaction_ref": "TX1",
            "transaction_type": "payin",
            "transaction_amount": "100",
            "transaction_currency": "XAF",
            "transaction_operator": "MTN",
            "signature": "ef63e99b47220c800201ed0720a83f7f",
        }))
        .unwrap();
        assert_eq!(client.check_callback_integrity(&payload), Ok(()));

        let mut client = client;
        client.set_private_key("rotated");
        assert_eq!(
            client.check_callback_integrity(&payload),
            Err(VerificationError::BadSignature)
        );
        client.set_public_key("pk_999");
        assert_eq!(
            client.check_callback_integrity(&payload),
            Err(VerificationError::KeyMismatch)
        );
    }

    #[test]
    fn test_is_verified_ip() {
        let client = MyCoolPayClient::new("pk_123", "secret").unwrap();
        assert_eq!(client.is_verified_ip("15.236.140.89"), Ok(()));
        assert_eq!(
            client.is_verified_ip("15.236.140.90"),
            Err(VerificationError::UnknownIp)
        );
    }

    #[test]
    fn test_verification_error_composes_with_client_error() {
        fn handle(client: &MyCoolPayClient, ip: &str) -> Result<(), ClientError> {
            client.is_verified_ip(ip)?;
            Ok(())
        }
        let client = MyCoolPayClient::new("pk_123", "secret").unwrap();
        assert!(matches!(
            handle(&client, "127.0.0.1"),
            Err(ClientError::Verification(VerificationError::UnknownIp))
        ));
    }
}
