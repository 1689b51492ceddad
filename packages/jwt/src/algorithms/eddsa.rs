//! Ed25519 signatures (`EdDSA`)

use super::{SignatureAlgorithm, wrong_key};
use crate::{
    error::JwtResult,
    keys::{Key, PrivateKey, PublicKey},
};
use ed25519_dalek::{Signature, Signer as _, Verifier as _, VerifyingKey};

/// Ed25519 as registered under `EdDSA` (RFC 8037).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Algorithm;

impl Ed25519Algorithm {
    const NAME: &'static str = "EdDSA";

    fn verify_with(message: &[u8], signature: &[u8], key: &VerifyingKey) -> bool {
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        key.verify(message, &signature).is_ok()
    }
}

impl SignatureAlgorithm for Ed25519Algorithm {
    fn sign(&self, message: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        match key {
            Key::Private(PrivateKey::Ed25519(signing_key)) => {
                Ok(signing_key.sign(message).to_bytes().to_vec())
            }
            Key::Private(_) | Key::Public(_) | Key::Secret(_) | Key::Unsecured => {
                Err(wrong_key(Self::NAME, key))
            }
        }
    }

    fn verify(&self, message: &[u8], signature: &[u8], key: &Key) -> JwtResult<bool> {
        match key {
            Key::Public(PublicKey::Ed25519(verifying_key)) => {
                Ok(Self::verify_with(message, signature, verifying_key))
            }
            Key::Private(PrivateKey::Ed25519(signing_key)) => Ok(Self::verify_with(
                message,
                signature,
                &signing_key.verifying_key(),
            )),
            Key::Private(_) | Key::Public(_) | Key::Secret(_) | Key::Unsecured => {
                Err(wrong_key(Self::NAME, key))
            }
        }
    }
}
