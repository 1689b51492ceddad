//! HMAC-based JWT algorithms (HS256, HS384, HS512)

use super::{ShaSize, SignatureAlgorithm, wrong_key};
use crate::{
    error::{JwtError, JwtResult},
    keys::Key,
};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// HMAC with a SHA-2 digest.
#[derive(Debug, Clone, Copy)]
pub struct HmacAlgorithm {
    name: &'static str,
    hash: ShaSize,
}

impl HmacAlgorithm {
    /// HS256
    pub const HS256: Self = Self::new("HS256", ShaSize::Sha256);
    /// HS384
    pub const HS384: Self = Self::new("HS384", ShaSize::Sha384);
    /// HS512
    pub const HS512: Self = Self::new("HS512", ShaSize::Sha512);

    /// Header name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    const fn new(name: &'static str, hash: ShaSize) -> Self {
        Self { name, hash }
    }

    fn mac(&self, message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
        let invalid = |_| JwtError::invalid_key("invalid HMAC key");
        let tag = match self.hash {
            ShaSize::Sha256 => {
                let mut mac = HmacSha256::new_from_slice(secret).map_err(invalid)?;
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
            ShaSize::Sha384 => {
                let mut mac = HmacSha384::new_from_slice(secret).map_err(invalid)?;
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
            ShaSize::Sha512 => {
                let mut mac = HmacSha512::new_from_slice(secret).map_err(invalid)?;
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
        };
        Ok(tag)
    }
}

impl SignatureAlgorithm for HmacAlgorithm {
    fn sign(&self, message: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        match key {
            Key::Secret(secret) => self.mac(message, secret.as_bytes()),
            Key::Private(_) | Key::Public(_) | Key::Unsecured => Err(wrong_key(self.name, key)),
        }
    }

    fn verify(&self, message: &[u8], signature: &[u8], key: &Key) -> JwtResult<bool> {
        match key {
            Key::Secret(secret) => {
                let expected = self.mac(message, secret.as_bytes())?;
                // Length mismatch yields false without an early return on content.
                Ok(expected.as_slice().ct_eq(signature).into())
            }
            Key::Private(_) | Key::Public(_) | Key::Unsecured => Err(wrong_key(self.name, key)),
        }
    }
}
