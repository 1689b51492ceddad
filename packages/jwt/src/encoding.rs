//! Compact serialization: base64url segments joined by `.`
//!
//! Encoding is unpadded base64url (RFC 7515 §2). Decoding is strict: padding,
//! characters outside the url-safe alphabet and non-canonical trailing bits
//! are all rejected as malformed.

use crate::error::{JwtError, JwtResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Encode bytes as one unpadded base64url segment.
#[inline]
#[must_use]
pub fn encode_segment(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode one base64url segment.
///
/// # Errors
/// Returns [`JwtError::Malformed`] on invalid characters, padding or length.
#[inline]
pub fn decode_segment(segment: &str) -> JwtResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| JwtError::malformed("invalid base64url segment"))
}

/// The three raw segments of a compact token, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParts<'a> {
    /// Encoded header segment
    pub header: &'a str,
    /// Encoded payload segment
    pub payload: &'a str,
    /// Encoded signature segment; empty only for unsigned tokens
    pub signature: &'a str,
}

impl TokenParts<'_> {
    /// The bytes a signature is computed over: `header "." payload`.
    #[must_use]
    pub fn signing_input(&self) -> String {
        signing_input(self.header, self.payload)
    }
}

/// Split a compact token into its three segments.
///
/// Header and payload must be non-empty. The signature segment may be empty;
/// callers decide whether the declared algorithm permits that.
///
/// # Errors
/// Returns [`JwtError::Malformed`] unless the token has exactly three
/// dot-separated segments with non-empty header and payload.
pub fn split_token(token: &str) -> JwtResult<TokenParts<'_>> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(JwtError::malformed("token must have exactly three segments"));
    };

    if header.is_empty() || payload.is_empty() {
        return Err(JwtError::malformed("empty token segment"));
    }

    Ok(TokenParts {
        header,
        payload,
        signature,
    })
}

/// Build the signing input from two encoded segments.
#[must_use]
pub(crate) fn signing_input(header_b64: &str, payload_b64: &str) -> String {
    let mut input = String::with_capacity(header_b64.len() + 1 + payload_b64.len());
    input.push_str(header_b64);
    input.push('.');
    input.push_str(payload_b64);
    input
}
