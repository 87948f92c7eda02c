//! HTTP Basic credentials built from a bare API key.
//!
//! Rana servers expect the key itself as the Basic payload, not the
//! `user:password` pair from RFC 7617. The wire format is kept as-is.

use std::fmt;

use base64::{engine::general_purpose, Engine as _};

/// An opaque API key. No format validation is performed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Standard (padded, non URL-safe) base64 of the raw key.
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.0.as_bytes())
    }

    /// Value for the `Authorization` header.
    pub fn authorization_value(&self) -> String {
        format!("Basic {}", self.to_base64())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Recover the key from an `Authorization: Basic ...` value.
///
/// Returns `None` for other schemes or a payload that is not base64 text.
pub fn decode_authorization(header: &str) -> Option<String> {
    let (scheme, payload) = header.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let bytes = general_purpose::STANDARD.decode(payload.trim()).ok()?;
    String::from_utf8(bytes).ok()
}
