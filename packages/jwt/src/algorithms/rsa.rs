//! RSA-based JWT algorithms
//!
//! PKCS#1 v1.5 (RS256, RS384, RS512) and PSS with a salt as long as the
//! digest (PS256, PS384, PS512).

use super::{ShaSize, SignatureAlgorithm, wrong_key};
use crate::{
    error::JwtResult,
    keys::{Key, PrivateKey, PublicKey},
};
use rand_core::OsRng;
use rsa::{
    RsaPrivateKey, RsaPublicKey, pkcs1v15, pss,
    signature::{RandomizedSigner as _, SignatureEncoding as _, Signer as _, Verifier as _},
};
use sha2::{Sha256, Sha384, Sha512};

/// RSA signature padding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaPadding {
    /// RSASSA-PKCS1-v1_5
    Pkcs1v15,
    /// RSASSA-PSS
    Pss,
}

/// RSA signature with a SHA-2 digest.
#[derive(Debug, Clone, Copy)]
pub struct RsaAlgorithm {
    name: &'static str,
    hash: ShaSize,
    padding: RsaPadding,
}

impl RsaAlgorithm {
    /// RS256
    pub const RS256: Self = Self::new("RS256", ShaSize::Sha256, RsaPadding::Pkcs1v15);
    /// RS384
    pub const RS384: Self = Self::new("RS384", ShaSize::Sha384, RsaPadding::Pkcs1v15);
    /// RS512
    pub const RS512: Self = Self::new("RS512", ShaSize::Sha512, RsaPadding::Pkcs1v15);
    /// PS256
    pub const PS256: Self = Self::new("PS256", ShaSize::Sha256, RsaPadding::Pss);
    /// PS384
    pub const PS384: Self = Self::new("PS384", ShaSize::Sha384, RsaPadding::Pss);
    /// PS512
    pub const PS512: Self = Self::new("PS512", ShaSize::Sha512, RsaPadding::Pss);

    /// Header name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Padding scheme.
    #[must_use]
    pub const fn padding(&self) -> RsaPadding {
        self.padding
    }

    const fn new(name: &'static str, hash: ShaSize, padding: RsaPadding) -> Self {
        Self {
            name,
            hash,
            padding,
        }
    }

    fn sign_with(&self, message: &[u8], key: &RsaPrivateKey) -> Vec<u8> {
        let key = key.clone();
        match (self.padding, self.hash) {
            (RsaPadding::Pkcs1v15, ShaSize::Sha256) => {
                pkcs1v15::SigningKey::<Sha256>::new(key).sign(message).to_vec()
            }
            (RsaPadding::Pkcs1v15, ShaSize::Sha384) => {
                pkcs1v15::SigningKey::<Sha384>::new(key).sign(message).to_vec()
            }
            (RsaPadding::Pkcs1v15, ShaSize::Sha512) => {
                pkcs1v15::SigningKey::<Sha512>::new(key).sign(message).to_vec()
            }
            (RsaPadding::Pss, ShaSize::Sha256) => pss::BlindedSigningKey::<Sha256>::new(key)
                .sign_with_rng(&mut OsRng, message)
                .to_vec(),
            (RsaPadding::Pss, ShaSize::Sha384) => pss::BlindedSigningKey::<Sha384>::new(key)
                .sign_with_rng(&mut OsRng, message)
                .to_vec(),
            (RsaPadding::Pss, ShaSize::Sha512) => pss::BlindedSigningKey::<Sha512>::new(key)
                .sign_with_rng(&mut OsRng, message)
                .to_vec(),
        }
    }

    fn verify_with(&self, message: &[u8], signature: &[u8], key: &RsaPublicKey) -> bool {
        let key = key.clone();
        match self.padding {
            RsaPadding::Pkcs1v15 => {
                let Ok(signature) = pkcs1v15::Signature::try_from(signature) else {
                    return false;
                };
                match self.hash {
                    ShaSize::Sha256 => pkcs1v15::VerifyingKey::<Sha256>::new(key)
                        .verify(message, &signature)
                        .is_ok(),
                    ShaSize::Sha384 => pkcs1v15::VerifyingKey::<Sha384>::new(key)
                        .verify(message, &signature)
                        .is_ok(),
                    ShaSize::Sha512 => pkcs1v15::VerifyingKey::<Sha512>::new(key)
                        .verify(message, &signature)
                        .is_ok(),
                }
            }
            RsaPadding::Pss => {
                let Ok(signature) = pss::Signature::try_from(signature) else {
                    return false;
                };
                match self.hash {
                    ShaSize::Sha256 => pss::VerifyingKey::<Sha256>::new(key)
                        .verify(message, &signature)
                        .is_ok(),
                    ShaSize::Sha384 => pss::VerifyingKey::<Sha384>::new(key)
                        .verify(message, &signature)
                        .is_ok(),
                    ShaSize::Sha512 => pss::VerifyingKey::<Sha512>::new(key)
                        .verify(message, &signature)
                        .is_ok(),
                }
            }
        }
    }
}

impl SignatureAlgorithm for RsaAlgorithm {
    fn sign(&self, message: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        match key {
            Key::Private(PrivateKey::Rsa(private)) => Ok(self.sign_with(message, private)),
            Key::Private(_) | Key::Public(_) | Key::Secret(_) | Key::Unsecured => {
                Err(wrong_key(self.name, key))
            }
        }
    }

    fn verify(&self, message: &[u8], signature: &[u8], key: &Key) -> JwtResult<bool> {
        match key {
            Key::Public(PublicKey::Rsa(public)) => Ok(self.verify_with(message, signature, public)),
            Key::Private(PrivateKey::Rsa(private)) => {
                Ok(self.verify_with(message, signature, &private.to_public_key()))
            }
            Key::Private(_) | Key::Public(_) | Key::Secret(_) | Key::Unsecured => {
                Err(wrong_key(self.name, key))
            }
        }
    }
}
