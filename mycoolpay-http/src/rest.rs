//! Generic JSON transport used by [`crate::MyCoolPayClient`].
//!
//! [`RestClient`] knows nothing about the gateway's endpoints: it joins path
//! segments onto a base URL, attaches headers, sends the request with
//! `reqwest`, and maps the outcome onto [`Response`] or [`ClientError`].
//!
//! ## Error Handling
//!
//! - transport failures map to [`ClientError::Http`]
//! - non-`2xx` statuses map to [`ClientError::HttpStatus`] with the raw body
//! - `2xx` bodies that are not JSON map to [`ClientError::JsonDeserialization`]

use std::fmt::Display;
use std::time::Duration;

use http::HeaderMap;
use http::header::USER_AGENT;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::Span;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::response::Response;

/// A JSON-over-HTTP client bound to one base URL.
#[derive(Clone, Debug)]
pub struct RestClient {
    /// Base URL; path segments are appended to it
    base_url: Url,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Headers sent with each request
    headers: HeaderMap,
    /// Optional request timeout
    timeout: Option<Duration>,
    /// `User-Agent` header value
    user_agent: String,
}

impl RestClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` cannot carry path
    /// segments.
    pub fn try_new(base_url: Url) -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::default().with_base_url(base_url))
    }

    /// Creates a client from a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the configured base URL
    /// cannot carry path segments.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        if config.base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(config.base_url.to_string()));
        }
        Ok(Self {
            base_url: config.base_url,
            client: Client::new(),
            headers: HeaderMap::new(),
            timeout: config.timeout,
            user_agent: config.user_agent,
        })
    }

    /// Returns the base URL used by this client.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the headers sent with every request.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the configured timeout, if any.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Attaches custom headers to all future requests.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the URL for `path` (each element one percent-encoded segment)
    /// with `query` appended.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the base URL cannot carry
    /// path segments.
    pub fn endpoint(&self, path: &[&str], query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(path);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Sends a `GET` request.
    ///
    /// `context` is a human-readable identifier used in tracing and error
    /// messages (e.g. `"GET /balance"`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the gateway answers
    /// with a non-`2xx` status.
    pub async fn get(
        &self,
        context: &'static str,
        path: &[&str],
        query: &[(&str, &str)],
        headers: &HeaderMap,
    ) -> Result<Response, ClientError> {
        let url = self.endpoint(path, query)?;
        let req = self.client.get(url);
        self.send(context, req, headers).await
    }

    /// Sends a `POST` request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the gateway answers
    /// with a non-`2xx` status.
    pub async fn post<T>(
        &self,
        context: &'static str,
        path: &[&str],
        body: &T,
        headers: &HeaderMap,
    ) -> Result<Response, ClientError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(path, &[])?;
        let req = self.client.post(url).json(body);
        self.send(context, req, headers).await
    }

    /// Applies default headers, per-call headers and the timeout, then sends
    /// the request and decodes the response.
    async fn send(
        &self,
        context: &'static str,
        req: RequestBuilder,
        headers: &HeaderMap,
    ) -> Result<Response, ClientError> {
        let mut req = req.header(USER_AGENT, self.user_agent.as_str());
        for (key, value) in self.headers.iter().chain(headers) {
            req = req.header(key, value);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        #[cfg(feature = "telemetry")]
        tracing::debug!(context, "Sending gateway request");

        let result = execute(context, req).await;

        record_result_on_span(&result);

        result
    }
}

async fn execute(context: &'static str, req: RequestBuilder) -> Result<Response, ClientError> {
    let http_response = req
        .send()
        .await
        .map_err(|e| ClientError::Http { context, source: e })?;
    let status = http_response.status();
    let headers = http_response.headers().clone();
    let text = http_response
        .text()
        .await
        .map_err(|e| ClientError::ResponseBodyRead { context, source: e })?;

    #[cfg(feature = "telemetry")]
    tracing::debug!(context, status = %status, "Gateway response received");

    if !status.is_success() {
        return Err(ClientError::HttpStatus {
            context,
            status,
            body: text,
        });
    }
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text)
            .map_err(|e| ClientError::JsonDeserialization { context, source: e })?
    };
    Ok(Response::new(status, headers, body))
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to gateway failed");
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
