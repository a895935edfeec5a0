//! Utility functions and types.

use crate::Error;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use std::fmt::Debug;

/// Redact hides a secret in `Debug` output.
///
/// Secrets of 12 bytes or more keep their first and last three characters so
/// two tokens can still be told apart in logs. Shorter ones are fully masked.
pub struct Redact<'a>(Option<&'a str>);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(Some(value))
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(Some(value))
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secret = match self.0 {
            None | Some("") => return f.write_str("EMPTY"),
            Some(v) => v,
        };

        let n = secret.len();
        match (secret.get(..3), secret.get(n.saturating_sub(3)..)) {
            (Some(head), Some(tail)) if n >= 12 => write!(f, "{head}***{tail}"),
            _ => f.write_str("***"),
        }
    }
}

/// Base64 decode
///
/// Failures are reported as authentication errors since the only base64
/// input we accept is credential material.
pub fn base64_decode(content: &str) -> crate::Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(content.trim())
        .map_err(|e| Error::authentication("base64 decode failed").with_source(e))
}
