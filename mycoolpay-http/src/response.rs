//! Decoded gateway responses.

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A successful (`2xx`) response from the gateway.
///
/// The body is kept as a JSON [`Value`] so callers can read the fields they
/// need, or decode it into their own type with [`Response::json`]. An empty
/// body decodes to [`Value::Null`].
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

impl Response {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Decoded JSON body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Consumes the response, returning the JSON body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }

    /// The gateway's own `status` field (`"success"` or `"error"`), if present.
    #[must_use]
    pub fn gateway_status(&self) -> Option<&str> {
        self.body.get("status").and_then(Value::as_str)
    }

    /// The gateway's `message` field, if present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Paylink {
        transaction_ref: String,
        payment_url: String,
    }

    fn response(body: Value) -> Response {
        Response::new(StatusCode::OK, HeaderMap::new(), body)
    }

    #[test]
    fn test_json_decodes_body() {
        let res = response(json!({
            "status": "success",
            "transaction_ref": "TX1",
            "payment_url": "https://my-coolpay.com/payment/TX1",
        }));
        let paylink: Paylink = res.json().unwrap();
        assert_eq!(paylink.transaction_ref, "TX1");
        assert_eq!(paylink.payment_url, "https://my-coolpay.com/payment/TX1");
        assert_eq!(res.gateway_status(), Some("success"));
    }

    #[test]
    fn test_json_type_mismatch() {
        let res = response(json!({ "status": "success" }));
        assert!(res.json::<Paylink>().is_err());
    }

    #[test]
    fn test_message_absent_on_null_body() {
        let res = response(Value::Null);
        assert_eq!(res.message(), None);
        assert_eq!(res.gateway_status(), None);
    }
}
