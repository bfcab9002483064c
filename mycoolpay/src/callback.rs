//! Gateway callback payloads and signature verification.
//!
//! The gateway signs each callback with
//! `md5(transaction_ref . transaction_type . transaction_amount . transaction_currency . transaction_operator . private_key)`,
//! rendered as lowercase hex, and places the result in the `signature` field.
//! The field order and the absence of separators are part of the gateway's
//! wire contract.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::digest::{constant_time_eq, md5_hex};
use crate::error::VerificationError;

/// Callback fields covered by the signature, in signing order.
pub const SIGNED_FIELDS: [&str; 5] = [
    "transaction_ref",
    "transaction_type",
    "transaction_amount",
    "transaction_currency",
    "transaction_operator",
];

/// Field carrying the merchant public key the callback is addressed to.
pub const APPLICATION_FIELD: &str = "application";

/// Field carrying the gateway's signature.
pub const SIGNATURE_FIELD: &str = "signature";

/// A webhook callback as received from the gateway.
///
/// Callbacks are flat key-value mappings whose values are strings or numbers.
/// The payload can be decoded from a JSON body, built from form-encoded pairs,
/// or converted from an arbitrary [`Value`].
///
/// ```rust
/// use mycoolpay::CallbackPayload;
///
/// let payload: CallbackPayload = [
///     ("application", "pk_123"),
///     ("transaction_ref", "TX1"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(payload.application(), Some("pk_123"));
/// assert_eq!(payload.field_text("transaction_amount"), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackPayload(Map<String, Value>);

impl CallbackPayload {
    /// Wraps an already decoded JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the raw value of `field`, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The public key this callback is addressed to, if it is a string.
    #[must_use]
    pub fn application(&self) -> Option<&str> {
        map_str(&self.0, APPLICATION_FIELD)
    }

    /// The signature sent by the gateway, if it is a string.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        map_str(&self.0, SIGNATURE_FIELD)
    }

    /// Text that `field` contributes to the signed string.
    ///
    /// Absent and `null` fields contribute the empty string.
    #[must_use]
    pub fn field_text(&self, field: &str) -> String {
        map_field_text(&self.0, field)
    }

    /// Borrows the underlying mapping.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the payload, returning the underlying mapping.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for CallbackPayload {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Anything other than a JSON object cannot be addressed to a merchant.
impl TryFrom<Value> for CallbackPayload {
    type Error = VerificationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(VerificationError::KeyMismatch),
        }
    }
}

/// Builds a payload from form-encoded pairs; every value is kept as a string.
impl<K, V> FromIterator<(K, V)> for CallbackPayload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }
}

/// Renders a field value the way the gateway concatenates it when signing.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(true) => "1".to_owned(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => float_text(f),
        _ => n.to_string(),
    }
}

/// Significant digits the gateway keeps when it renders a float.
const FLOAT_PRECISION: i32 = 14;

/// Renders a float with [`FLOAT_PRECISION`] significant digits, trailing
/// zeros dropped.
///
/// Values whose decimal point falls outside `[-3, FLOAT_PRECISION]` use
/// exponent notation: `1.0E+15`, `1.5E-5`. `100.0` renders `100` and
/// `0.1 + 0.2` renders `0.3`.
#[allow(clippy::float_cmp)]
fn float_text(f: f64) -> String {
    if f == 0.0 {
        return if f.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    // `d.ddddddddddddde<exp>`, correctly rounded to FLOAT_PRECISION digits.
    let scientific = format!("{:.*e}", FLOAT_PRECISION.unsigned_abs() as usize - 1, f.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.to_string();
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let decimal_point = exponent + 1;

    let mut out = String::new();
    if f.is_sign_negative() {
        out.push('-');
    }
    if decimal_point < -3 || decimal_point > FLOAT_PRECISION {
        let (lead, rest) = digits.split_at(1);
        out.push_str(lead);
        out.push('.');
        out.push_str(if rest.is_empty() { "0" } else { rest });
        out.push('E');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&exponent.unsigned_abs().to_string());
    } else if decimal_point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', decimal_point.unsigned_abs() as usize));
        out.push_str(digits);
    } else {
        let point = decimal_point.unsigned_abs() as usize;
        if digits.len() <= point {
            out.push_str(digits);
            out.extend(std::iter::repeat_n('0', point - digits.len()));
        } else {
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    }
    out
}

fn map_str<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    fields.get(field).and_then(Value::as_str)
}

fn map_field_text(fields: &Map<String, Value>, field: &str) -> String {
    fields.get(field).map(value_text).unwrap_or_default()
}

fn map_signature_base(fields: &Map<String, Value>, private_key: &str) -> String {
    let mut base: String = SIGNED_FIELDS
        .iter()
        .map(|field| map_field_text(fields, field))
        .collect();
    base.push_str(private_key);
    base
}

fn verify_fields(
    fields: &Map<String, Value>,
    public_key: &str,
    private_key: &str,
) -> Result<(), VerificationError> {
    let application = map_str(fields, APPLICATION_FIELD);
    if application != Some(public_key) {
        #[cfg(feature = "telemetry")]
        tracing::warn!(
            code = VerificationError::KeyMismatch.code(),
            application = ?application,
            "Rejected gateway callback"
        );
        return Err(VerificationError::KeyMismatch);
    }

    let expected = md5_hex(&map_signature_base(fields, private_key));
    match map_str(fields, SIGNATURE_FIELD) {
        Some(signature) if constant_time_eq(signature, &expected) => Ok(()),
        _ => {
            #[cfg(feature = "telemetry")]
            tracing::warn!(
                code = VerificationError::BadSignature.code(),
                transaction_ref = %map_field_text(fields, "transaction_ref"),
                "Rejected gateway callback"
            );
            Err(VerificationError::BadSignature)
        }
    }
}

/// The string the gateway hashes: the signed fields in order, then the private key.
#[must_use]
pub fn signature_base(payload: &CallbackPayload, private_key: &str) -> String {
    map_signature_base(&payload.0, private_key)
}

/// The signature the gateway is expected to have sent for `payload`.
#[must_use]
pub fn compute_signature(payload: &CallbackPayload, private_key: &str) -> String {
    md5_hex(&signature_base(payload, private_key))
}

/// Checks that a callback is addressed to `public_key` and signed with `private_key`.
///
/// The account check runs first and does not hash anything. The signature is
/// compared with exact string equality, so an uppercase hex signature is
/// rejected.
///
/// # Errors
///
/// - [`VerificationError::KeyMismatch`] if `application` is missing or differs
///   from `public_key`.
/// - [`VerificationError::BadSignature`] if `signature` is missing or differs
///   from [`compute_signature`].
pub fn verify_callback(
    payload: &CallbackPayload,
    public_key: &str,
    private_key: &str,
) -> Result<(), VerificationError> {
    verify_fields(&payload.0, public_key, private_key)
}

/// Like [`verify_callback`], for a payload that has not been checked to be a mapping.
///
/// The value is checked in place, without copying it into a [`CallbackPayload`].
///
/// # Errors
///
/// Returns [`VerificationError::KeyMismatch`] if `payload` is not a JSON
/// object, otherwise whatever [`verify_callback`] returns.
pub fn verify_callback_value(
    payload: &Value,
    public_key: &str,
    private_key: &str,
) -> Result<(), VerificationError> {
    match payload {
        Value::Object(fields) => verify_fields(fields, public_key, private_key),
        _ => Err(VerificationError::KeyMismatch),
    }
}
