//! Signature algorithms and the registry that names them
//!
//! Each algorithm is an [`AlgorithmDescriptor`]: the header name, the family,
//! the key kind it accepts, and a [`SignatureAlgorithm`] implementation that
//! does the cryptography. The key kind is checked once at the sign/verify
//! boundary, so an RSA public key can never reach an HMAC verify function.

mod ecdsa;
mod eddsa;
mod hmac;
mod none;
mod registry;
mod rsa;

pub use ecdsa::EcdsaAlgorithm;
pub use eddsa::Ed25519Algorithm;
pub use hmac::HmacAlgorithm;
pub use none::NoneAlgorithm;
pub use registry::AlgorithmRegistry;
pub use rsa::{RsaAlgorithm, RsaPadding};

use crate::{
    error::{JwtError, JwtResult},
    keys::{Key, KeyKind},
};
use std::{fmt, sync::Arc};

/// Cryptographic family an algorithm belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// HMAC with SHA-2
    Hmac,
    /// RSA PKCS#1 v1.5 and RSA-PSS
    Rsa,
    /// ECDSA over NIST curves
    Ecdsa,
    /// Edwards-curve signatures
    EdDsa,
    /// Unsigned tokens
    None,
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmFamily::Hmac => "HMAC",
            AlgorithmFamily::Rsa => "RSA",
            AlgorithmFamily::Ecdsa => "ECDSA",
            AlgorithmFamily::EdDsa => "EdDSA",
            AlgorithmFamily::None => "none",
        };
        f.write_str(name)
    }
}

/// SHA-2 digest width used by HMAC, RSA and PSS algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaSize {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

/// Signing algorithm interface.
///
/// Implementations must be thread-safe (Send + Sync). Keys arrive already
/// checked against the descriptor's [`KeyKind`]; implementations still match
/// every [`Key`] variant and reject the ones they cannot use.
pub trait SignatureAlgorithm: Send + Sync + 'static {
    /// Sign `message` (the ASCII signing input) and return raw signature bytes.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] when the key cannot sign.
    fn sign(&self, message: &[u8], key: &Key) -> JwtResult<Vec<u8>>;

    /// Check `signature` over `message`. `Ok(false)` means the signature is
    /// wrong; `Err` means the check could not be attempted.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] when the key cannot verify.
    fn verify(&self, message: &[u8], signature: &[u8], key: &Key) -> JwtResult<bool>;
}

/// Registry entry: header name, family, accepted key kind and implementation.
#[derive(Clone)]
pub struct AlgorithmDescriptor {
    name: String,
    family: AlgorithmFamily,
    key_kind: KeyKind,
    algorithm: Arc<dyn SignatureAlgorithm>,
}

impl AlgorithmDescriptor {
    /// Create a descriptor.
    pub fn new(
        name: impl Into<String>,
        family: AlgorithmFamily,
        key_kind: KeyKind,
        algorithm: Arc<dyn SignatureAlgorithm>,
    ) -> Self {
        Self {
            name: name.into(),
            family,
            key_kind,
            algorithm,
        }
    }

    /// Name written to the header's `alg` field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Algorithm family.
    #[must_use]
    pub fn family(&self) -> AlgorithmFamily {
        self.family
    }

    /// Key kind this algorithm accepts.
    #[must_use]
    pub fn key_kind(&self) -> KeyKind {
        self.key_kind
    }

    /// Reject keys that cannot sign with this algorithm.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] on a kind mismatch or a public key.
    pub fn check_signing_key(&self, key: &Key) -> JwtResult<()> {
        self.check_kind(key)?;
        if !key.can_sign() {
            return Err(JwtError::invalid_key(&format!(
                "{} signing requires a private key",
                self.name
            )));
        }
        if let Key::Secret(secret) = key
            && secret.is_empty()
        {
            return Err(JwtError::invalid_key("secret must not be empty"));
        }
        Ok(())
    }

    /// Reject keys that cannot verify with this algorithm.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] on a kind mismatch.
    pub fn check_verifying_key(&self, key: &Key) -> JwtResult<()> {
        self.check_kind(key)?;
        if let Key::Secret(secret) = key
            && secret.is_empty()
        {
            return Err(JwtError::invalid_key("secret must not be empty"));
        }
        Ok(())
    }

    /// Sign after checking the key shape.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] when the key does not fit.
    pub fn sign(&self, message: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        self.check_signing_key(key)?;
        self.algorithm.sign(message, key)
    }

    /// Verify after checking the key shape.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] when the key does not fit.
    pub fn verify(&self, message: &[u8], signature: &[u8], key: &Key) -> JwtResult<bool> {
        self.check_verifying_key(key)?;
        self.algorithm.verify(message, signature, key)
    }

    fn check_kind(&self, key: &Key) -> JwtResult<()> {
        let actual = key.kind();
        if actual != self.key_kind {
            return Err(JwtError::invalid_key(&format!(
                "{} requires a {} key, got {actual}",
                self.name, self.key_kind
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmDescriptor")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("key_kind", &self.key_kind)
            .finish_non_exhaustive()
    }
}

/// Error for a key variant an implementation cannot use.
pub(crate) fn wrong_key(alg: &str, key: &Key) -> JwtError {
    JwtError::invalid_key(&format!("{alg} cannot use a {} key", key.kind()))
}
