//! Request bodies for the gateway's payment endpoints.
//!
//! Every client method accepts any [`Serialize`] body, so these types are a
//! convenience: `None` fields are left out of the JSON entirely.

use serde::{Deserialize, Serialize};

/// Customer details shared by paylink, payin and payout requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Mobile money number, international format without `+`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone_number: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Language of gateway-hosted pages and messages (`"fr"` or `"en"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_lang: Option<String>,
}

/// Amount, currency and merchant references common to all payment requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Amount in whole currency units.
    pub transaction_amount: u64,
    /// ISO 4217 currency code, e.g. `"XAF"`.
    pub transaction_currency: String,
    /// Free-text reason shown to the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_reason: Option<String>,
    /// Merchant-side reference echoed back in callbacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_transaction_ref: Option<String>,
}

impl Transaction {
    /// Creates a transaction with no reason or merchant reference.
    #[must_use]
    pub fn new(amount: u64, currency: impl Into<String>) -> Self {
        Self {
            transaction_amount: amount,
            transaction_currency: currency.into(),
            transaction_reason: None,
            app_transaction_ref: None,
        }
    }

    /// Sets the reason shown to the customer.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.transaction_reason = Some(reason.into());
        self
    }

    /// Sets the merchant-side reference.
    #[must_use]
    pub fn with_app_ref(mut self, app_ref: impl Into<String>) -> Self {
        self.app_transaction_ref = Some(app_ref.into());
        self
    }
}

/// Body of `POST /paylink`: a hosted payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaylinkRequest {
    /// Amount and references.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Optional prefill of the hosted page.
    #[serde(flatten)]
    pub customer: Customer,
}

impl PaylinkRequest {
    /// Creates a paylink request without customer prefill.
    #[must_use]
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction,
            customer: Customer::default(),
        }
    }
}

/// Body of `POST /payin`: a direct mobile money collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayinRequest {
    /// Amount and references.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Customer to collect from; the phone number is required by the gateway.
    #[serde(flatten)]
    pub customer: Customer,
}

impl PayinRequest {
    /// Creates a payin request charging `phone_number`.
    #[must_use]
    pub fn new(transaction: Transaction, phone_number: impl Into<String>) -> Self {
        Self {
            transaction,
            customer: Customer {
                customer_phone_number: Some(phone_number.into()),
                ..Customer::default()
            },
        }
    }
}

/// Body of `POST /payin/authorize`: confirms a payin that requires an OTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizePayinRequest {
    /// Gateway reference returned by the payin call.
    pub transaction_ref: String,
    /// One-time code received by the customer.
    pub code: String,
}

/// Body of `POST /payout`: a transfer from the merchant balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRequest {
    /// Amount and references.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Beneficiary; the phone number is required by the gateway.
    #[serde(flatten)]
    pub customer: Customer,
}

impl PayoutRequest {
    /// Creates a payout to `phone_number`.
    #[must_use]
    pub fn new(transaction: Transaction, phone_number: impl Into<String>) -> Self {
        Self {
            transaction,
            customer: Customer {
                customer_phone_number: Some(phone_number.into()),
                ..Customer::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payin_serializes_flat() {
        let req = PayinRequest::new(
            Transaction::new(100, "XAF").with_reason("Order 42"),
            "237690000000",
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "transaction_amount": 100,
                "transaction_currency": "XAF",
                "transaction_reason": "Order 42",
                "customer_phone_number": "237690000000",
            })
        );
    }

    #[test]
    fn test_paylink_omits_unset_fields() {
        let req = PaylinkRequest::new(Transaction::new(500, "XAF").with_app_ref("ORD-1"));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "transaction_amount": 500,
                "transaction_currency": "XAF",
                "app_transaction_ref": "ORD-1",
            })
        );
    }
}
