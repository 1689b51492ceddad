//! Unsigned tokens (`alg: "none"`)
//!
//! Only reachable with [`Key::Unsecured`] and an allow-list that names
//! `none` explicitly.

use super::{SignatureAlgorithm, wrong_key};
use crate::{error::JwtResult, keys::Key};

/// The `none` algorithm: empty signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneAlgorithm;

impl SignatureAlgorithm for NoneAlgorithm {
    fn sign(&self, _message: &[u8], key: &Key) -> JwtResult<Vec<u8>> {
        match key {
            Key::Unsecured => Ok(Vec::new()),
            Key::Secret(_) | Key::Private(_) | Key::Public(_) => Err(wrong_key("none", key)),
        }
    }

    fn verify(&self, _message: &[u8], signature: &[u8], key: &Key) -> JwtResult<bool> {
        match key {
            Key::Unsecured => Ok(signature.is_empty()),
            Key::Secret(_) | Key::Private(_) | Key::Public(_) => Err(wrong_key("none", key)),
        }
    }
}
