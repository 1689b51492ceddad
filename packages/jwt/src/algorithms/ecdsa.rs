//! ECDSA-based JWT algorithms (ES256, ES384)
//!
//! Signatures use the fixed-width JWS encoding `r || s` (RFC 7518 §3.4),
//! not ASN.1 DER.

use super::{SignatureAlgorithm, wrong_key};
use crate::{
    error::JwtResult,
    keys::{Key, PrivateKey, PublicKey},
};
use p256::ecdsa::signature::{Signer as _, Verifier as _};

/// Curve an ECDSA algorithm is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Curve {
    P256,
    P384,
}

/// ECDSA over a NIST curve with the matching SHA-2 digest.
#[derive(Debug, Clone, Copy)]
pub struct EcdsaAlgorithm {
    name: &'static str,
    curve: Curve,
}

impl EcdsaAlgorithm {
    /// ES256: P-256 with SHA-256
    pub const ES256: Self = Self {
        name: "ES256",
        curve: Curve::P256,
    };
    /// ES384: P-384 with SHA-384
    pub const ES384: Self = Self {
        name: "ES384",
        curve: Curve::P384,
    };

    fn verify_public(&self, message: &[u8], signature: &[u8], key: &PublicKey) -> Option<bool> {
        match (self.curve, key) {
            (Curve::P256, PublicKey::EcP256(verifying_key)) => {
                let Ok(signature) = p256::ecdsa::Signature::from_slice(signature) else {
                    return Some(false);
                };
                Some(verifying_key.verify(message, &signature).is_ok())
            }
            (Curve::P384, PublicKey::EcP384(verifying_key)) => {
                let Ok(signature) = p384::ecdsa::Signature::from_slice(signature) else {
                    return Some(false);
                };
                Some(verifying_key.verify(message, &signature).is_ok())
            }
            _ => None,
        }
    }
}

impl SignatureAlgorithm for EcdsaAlgorithm {
    fn sign(&self, message: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        match (self.curve, key) {
            (Curve::P256, Key::Private(PrivateKey::EcP256(signing_key))) => {
                let signature: p256::ecdsa::Signature = signing_key.sign(message);
                Ok(signature.to_bytes().to_vec())
            }
            (Curve::P384, Key::Private(PrivateKey::EcP384(signing_key))) => {
                let signature: p384::ecdsa::Signature = signing_key.sign(message);
                Ok(signature.to_bytes().to_vec())
            }
            _ => Err(wrong_key(self.name, key)),
        }
    }

    fn verify(&self, message: &[u8], signature: &[u8], key: &Key) -> JwtResult<bool> {
        let verified = match key {
            Key::Public(public) => self.verify_public(message, signature, public),
            Key::Private(private) => self.verify_public(message, signature, &private.public_key()),
            Key::Secret(_) | Key::Unsecured => None,
        };
        verified.ok_or_else(|| wrong_key(self.name, key))
    }
}
