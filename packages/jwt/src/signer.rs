//! Token signing
//!
//! Resolves the algorithm, checks the key and the payload, merges the option
//! claims into the payload and produces `header.payload.signature`.

use crate::{
    algorithms::{AlgorithmFamily, AlgorithmRegistry},
    claims::{Claims, names},
    encoding::{encode_segment, signing_input},
    error::{JwtError, JwtResult},
    keys::Key,
    options::SignOptions,
    types::JwtHeader,
};
use chrono::Utc;
use serde_json::Value;

/// Smallest RSA modulus accepted for signing without opting out.
pub const MIN_RSA_MODULUS_BITS: usize = 2048;

/// Header members that only the dedicated options may set.
const RESERVED_HEADER_FIELDS: [&str; 3] = ["alg", "typ", "kid"];

/// Sign `payload` with `key`.
///
/// # Errors
/// - [`JwtError::UnsupportedAlgorithm`] when the algorithm is not registered
/// - [`JwtError::InvalidOptions`] when a header field collides with `alg`,
///   `typ` or `kid`
/// - [`JwtError::InvalidKey`] when the key does not fit the algorithm
/// - [`JwtError::InvalidPayload`] when a registered claim has the wrong type
/// - [`JwtError::ClaimConflict`] when an option and a payload claim both set
///   the same field
pub fn sign_token(
    registry: &AlgorithmRegistry,
    payload: Claims,
    key: &Key,
    options: &SignOptions,
) -> JwtResult<String> {
    let descriptor = registry.get(&options.algorithm)?;
    let header = build_header(descriptor.name(), options)?;

    descriptor.check_signing_key(key)?;
    if descriptor.family() == AlgorithmFamily::Rsa && !options.allow_insecure_key_sizes {
        check_rsa_key_size(descriptor.name(), key)?;
    }

    check_registered_claim_types(&payload)?;
    let payload = merge_option_claims(payload, options)?;

    let header_json = serde_json::to_vec(&header)?;
    let payload_json = serde_json::to_vec(&payload)?;
    let header_b64 = encode_segment(&header_json);
    let payload_b64 = encode_segment(&payload_json);
    let message = signing_input(&header_b64, &payload_b64);

    let signature = descriptor.sign(message.as_bytes(), key)?;

    tracing::debug!(alg = descriptor.name(), "signed token");

    let mut token = message;
    token.push('.');
    token.push_str(&encode_segment(&signature));
    Ok(token)
}

fn build_header(alg: &str, options: &SignOptions) -> JwtResult<JwtHeader> {
    if let Some(name) = RESERVED_HEADER_FIELDS
        .iter()
        .find(|name| options.header.contains_key(**name))
    {
        return Err(JwtError::invalid_options(&format!(
            "header field \"{name}\" cannot be set directly"
        )));
    }

    let mut header = JwtHeader::new(alg);
    if let Some(typ) = &options.typ {
        header = header.with_type(typ.as_str());
    }
    if let Some(kid) = &options.key_id {
        header = header.with_key_id(kid.as_str());
    }
    Ok(header.with_members(options.header.clone()))
}

fn check_rsa_key_size(alg: &str, key: &Key) -> JwtResult<()> {
    match key.rsa_modulus_bits() {
        Some(bits) if bits < MIN_RSA_MODULUS_BITS => Err(JwtError::invalid_key(&format!(
            "{alg} requires a key of at least {MIN_RSA_MODULUS_BITS} bits"
        ))),
        _ => Ok(()),
    }
}

fn check_registered_claim_types(payload: &Claims) -> JwtResult<()> {
    for name in [names::EXP, names::NBF, names::IAT] {
        if let Some(value) = payload.get(name)
            && !value.is_number()
        {
            return Err(JwtError::invalid_payload(&format!(
                "\"{name}\" should be a number of seconds"
            )));
        }
    }

    for name in [names::ISS, names::SUB, names::JTI] {
        if let Some(value) = payload.get(name)
            && !value.is_string()
        {
            return Err(JwtError::invalid_payload(&format!(
                "\"{name}\" should be a string"
            )));
        }
    }

    match payload.get(names::AUD) {
        None | Some(Value::String(_)) => Ok(()),
        Some(Value::Array(values)) if values.iter().all(Value::is_string) => Ok(()),
        Some(_) => Err(JwtError::invalid_payload(
            "\"aud\" should be a string or an array of strings",
        )),
    }
}

fn merge_option_claims(mut payload: Claims, options: &SignOptions) -> JwtResult<Claims> {
    let conflicts = [
        (options.expires_in.is_some(), names::EXP, "expiresIn"),
        (options.not_before.is_some(), names::NBF, "notBefore"),
        (options.audience.is_some(), names::AUD, "audience"),
        (options.issuer.is_some(), names::ISS, "issuer"),
        (options.subject.is_some(), names::SUB, "subject"),
        (options.jwt_id.is_some(), names::JTI, "jwtid"),
    ];
    for (set, claim, option) in conflicts {
        if set && payload.contains(claim) {
            return Err(JwtError::claim_conflict(&format!(
                "option \"{option}\" conflicts with the payload's \"{claim}\" claim"
            )));
        }
    }

    let timestamp = payload
        .iat()
        .or(options.timestamp)
        .unwrap_or_else(|| Utc::now().timestamp());

    if options.no_timestamp {
        payload.remove(names::IAT);
    } else if !payload.contains(names::IAT) {
        payload.insert(names::IAT, timestamp);
    }

    if let Some(not_before) = options.not_before {
        payload.insert(names::NBF, not_before.after(timestamp));
    }
    if let Some(expires_in) = options.expires_in {
        payload.insert(names::EXP, expires_in.after(timestamp));
    }

    if let Some(audience) = &options.audience {
        let value = match audience.as_slice() {
            [single] => Value::String(single.clone()),
            many => Value::Array(many.iter().cloned().map(Value::String).collect()),
        };
        payload.insert(names::AUD, value);
    }
    if let Some(issuer) = &options.issuer {
        payload.insert(names::ISS, issuer.as_str());
    }
    if let Some(subject) = &options.subject {
        payload.insert(names::SUB, subject.as_str());
    }
    if let Some(jwt_id) = &options.jwt_id {
        payload.insert(names::JTI, jwt_id.as_str());
    }

    Ok(payload)
}
