//! Digest helpers shared by the verifiers.

use md5::{Digest, Md5};
use subtle::ConstantTimeEq;

/// MD5 of `input`, rendered as 32 lowercase hex characters.
pub(crate) fn md5_hex(input: &str) -> String {
    hex::encode(Md5::digest(input.as_bytes()))
}

/// Exact string equality that does not short-circuit on the first differing byte.
///
/// Strings of different lengths are unequal.
pub(crate) fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
