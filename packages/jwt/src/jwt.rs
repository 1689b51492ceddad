//! `Jwt` entry point
//!
//! One handle over an [`AlgorithmRegistry`] exposing the synchronous core and
//! its future and callback wrappers. Every form calls the same functions in
//! [`signer`](crate::signer) and [`verifier`](crate::verifier).

use crate::{
    algorithms::AlgorithmRegistry,
    claims::Claims,
    error::JwtResult,
    futures::AsyncJwtResult,
    keys::Key,
    options::{SignOptions, VerifyOptions},
    signer::sign_token,
    types::DecodedToken,
    verifier::{decode_token, decode_token_complete, verify_token, verify_token_complete},
};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;

static STANDARD_REGISTRY: Lazy<Arc<AlgorithmRegistry>> =
    Lazy::new(|| Arc::new(AlgorithmRegistry::standard()));

/// Sign, verify and decode tokens.
///
/// Cheap to clone; the registry is shared.
#[derive(Debug, Clone)]
pub struct Jwt {
    registry: Arc<AlgorithmRegistry>,
}

impl Default for Jwt {
    fn default() -> Self {
        Self {
            registry: Arc::clone(&STANDARD_REGISTRY),
        }
    }
}

impl Jwt {
    /// Handle over the built-in algorithms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle over a custom registry.
    #[must_use]
    pub fn with_registry(registry: impl Into<Arc<AlgorithmRegistry>>) -> Self {
        Self {
            registry: registry.into(),
        }
    }

    /// The registry in use.
    #[must_use]
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Sign `payload`, which must serialize to a JSON object.
    ///
    /// # Errors
    /// See [`sign_token`].
    pub fn sign<P: Serialize + ?Sized>(
        &self,
        payload: &P,
        key: &Key,
        options: &SignOptions,
    ) -> JwtResult<String> {
        let claims = Claims::from_serialize(payload)?;
        sign_token(&self.registry, claims, key, options)
    }

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    /// See [`verify_token`].
    pub fn verify(&self, token: &str, key: &Key, options: &VerifyOptions) -> JwtResult<Claims> {
        verify_token(&self.registry, token, key, options)
    }

    /// Verify `token` and return header, claims and signature segment.
    ///
    /// # Errors
    /// See [`verify_token`].
    pub fn verify_complete(
        &self,
        token: &str,
        key: &Key,
        options: &VerifyOptions,
    ) -> JwtResult<DecodedToken> {
        verify_token_complete(&self.registry, token, key, options)
    }

    /// Read the claims without verifying anything. Inspection only.
    #[must_use]
    pub fn decode(&self, token: &str) -> Option<Claims> {
        decode_token(token)
    }

    /// Read header, claims and signature segment without verifying anything.
    #[must_use]
    pub fn decode_complete(&self, token: &str) -> Option<DecodedToken> {
        decode_token_complete(token)
    }

    /// [`sign`](Self::sign) off the calling task.
    pub fn sign_async<P: Serialize + ?Sized>(
        &self,
        payload: &P,
        key: &Key,
        options: &SignOptions,
    ) -> AsyncJwtResult<String> {
        let claims = Claims::from_serialize(payload);
        let registry = Arc::clone(&self.registry);
        let key = key.clone();
        let options = options.clone();
        AsyncJwtResult::spawn(move || sign_token(&registry, claims?, &key, &options))
    }

    /// [`verify`](Self::verify) off the calling task.
    pub fn verify_async(
        &self,
        token: &str,
        key: &Key,
        options: &VerifyOptions,
    ) -> AsyncJwtResult<Claims> {
        let registry = Arc::clone(&self.registry);
        let token = token.to_string();
        let key = key.clone();
        let options = options.clone();
        AsyncJwtResult::spawn(move || verify_token(&registry, &token, &key, &options))
    }

    /// [`sign`](Self::sign), delivering the result to `callback`.
    pub fn sign_with<P, F, R>(
        &self,
        payload: &P,
        key: &Key,
        options: &SignOptions,
        callback: F,
    ) -> R
    where
        P: Serialize + ?Sized,
        F: FnOnce(JwtResult<String>) -> R,
    {
        callback(self.sign(payload, key, options))
    }

    /// [`verify`](Self::verify), delivering the result to `callback`.
    pub fn verify_with<F, R>(
        &self,
        token: &str,
        key: &Key,
        options: &VerifyOptions,
        callback: F,
    ) -> R
    where
        F: FnOnce(JwtResult<Claims>) -> R,
    {
        callback(self.verify(token, key, options))
    }
}
