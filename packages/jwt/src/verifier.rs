//! Token verification and decoding
//!
//! Verification is a sequence of hard gates:
//! 1. structure (segments, base64url, JSON objects, signature presence)
//! 2. algorithm allow-list
//! 3. signature
//! 4. claims
//!
//! Decoding runs the structural step only and never touches a key.

use crate::{
    algorithms::AlgorithmRegistry,
    claims::Claims,
    encoding::{TokenParts, decode_segment, split_token},
    error::{JwtError, JwtResult},
    keys::Key,
    options::VerifyOptions,
    types::{DecodedToken, JwtHeader},
    validation::validate_claims,
};
use serde_json::{Map, Value};

/// A token that passed the structural step.
struct ParsedToken<'a> {
    parts: TokenParts<'a>,
    header: JwtHeader,
    payload: Claims,
    signature: Vec<u8>,
}

impl ParsedToken<'_> {
    fn into_decoded(self) -> DecodedToken {
        DecodedToken {
            header: self.header,
            payload: self.payload,
            signature: self.parts.signature.to_string(),
        }
    }
}

/// Verify `token` and return its claims.
///
/// # Errors
/// Returns the error of the first gate that fails.
pub fn verify_token(
    registry: &AlgorithmRegistry,
    token: &str,
    key: &Key,
    options: &VerifyOptions,
) -> JwtResult<Claims> {
    verify_parsed(registry, token, key, options).map(|parsed| parsed.payload)
}

/// Verify `token` and return header, claims and the raw signature segment.
///
/// # Errors
/// Returns the error of the first gate that fails.
pub fn verify_token_complete(
    registry: &AlgorithmRegistry,
    token: &str,
    key: &Key,
    options: &VerifyOptions,
) -> JwtResult<DecodedToken> {
    verify_parsed(registry, token, key, options).map(ParsedToken::into_decoded)
}

/// Decode without verifying. `None` for anything malformed.
#[must_use]
pub fn decode_token(token: &str) -> Option<Claims> {
    parse(token).ok().map(|parsed| parsed.payload)
}

/// Decode header, claims and signature segment without verifying.
#[must_use]
pub fn decode_token_complete(token: &str) -> Option<DecodedToken> {
    parse(token).ok().map(ParsedToken::into_decoded)
}

fn verify_parsed<'a>(
    registry: &AlgorithmRegistry,
    token: &'a str,
    key: &Key,
    options: &VerifyOptions,
) -> JwtResult<ParsedToken<'a>> {
    options.check()?;

    let parsed = parse(token).inspect_err(|e| reject("structure", e))?;
    if parsed.parts.signature.is_empty() && !parsed.header.is_unsecured() {
        let err = JwtError::malformed("jwt signature is required");
        reject("structure", &err);
        return Err(err);
    }

    let alg = parsed
        .header
        .alg()
        .ok_or_else(|| JwtError::invalid_algorithm("header carries no string \"alg\""))
        .and_then(|alg| check_allowed(registry, alg, &options.algorithms))
        .inspect_err(|e| reject("algorithm", e))?;
    let descriptor = registry.get(alg).inspect_err(|e| reject("algorithm", e))?;

    let message = parsed.parts.signing_input();
    let valid = descriptor
        .verify(message.as_bytes(), &parsed.signature, key)
        .inspect_err(|e| reject("key", e))?;
    if !valid {
        let err = JwtError::InvalidSignature;
        reject("signature", &err);
        return Err(err);
    }

    validate_claims(&parsed.payload, options).inspect_err(|e| reject("claims", e))?;

    tracing::debug!(alg = descriptor.name(), "verified token");
    Ok(parsed)
}

fn parse(token: &str) -> JwtResult<ParsedToken<'_>> {
    let parts = split_token(token)?;

    let header = JwtHeader::from(decode_json(parts.header, "header")?);
    let payload = Claims::from(decode_json(parts.payload, "payload")?);

    let signature = decode_segment(parts.signature)?;

    Ok(ParsedToken {
        parts,
        header,
        payload,
        signature,
    })
}

fn decode_json(segment: &str, what: &str) -> JwtResult<Map<String, Value>> {
    let bytes = decode_segment(segment)?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|_| JwtError::malformed(&format!("invalid {what} JSON")))?;
    match value {
        Value::Object(members) => Ok(members),
        _ => Err(JwtError::malformed(&format!("{what} must be a JSON object"))),
    }
}

/// Canonical name of `alg` when the allow-list admits it.
fn check_allowed<'a>(
    registry: &'a AlgorithmRegistry,
    alg: &'a str,
    allowed: &[String],
) -> JwtResult<&'a str> {
    if allowed.is_empty() {
        return Err(JwtError::invalid_algorithm(
            "an explicit list of allowed algorithms is required",
        ));
    }

    let canonical = registry.canonical_name(alg).unwrap_or(alg);
    let admitted = allowed
        .iter()
        .any(|a| registry.canonical_name(a).unwrap_or(a) == canonical);
    if admitted {
        Ok(canonical)
    } else {
        Err(JwtError::invalid_algorithm(&format!(
            "{canonical} is not an allowed algorithm"
        )))
    }
}

fn reject(gate: &str, err: &JwtError) {
    tracing::debug!(gate, error = %err, "rejected token");
}
