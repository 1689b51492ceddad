//! Algorithm registry
//!
//! Built once, then shared read-only behind an `Arc`. Signer and verifier
//! receive the registry explicitly, so tests can swap in fake algorithms.

use super::{
    AlgorithmDescriptor, AlgorithmFamily, EcdsaAlgorithm, Ed25519Algorithm, HmacAlgorithm,
    NoneAlgorithm, RsaAlgorithm, SignatureAlgorithm,
};
use crate::{
    error::{JwtError, JwtResult},
    keys::KeyKind,
};
use std::{collections::HashMap, sync::Arc};

/// Name → descriptor table with alias support.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmRegistry {
    descriptors: HashMap<String, AlgorithmDescriptor>,
    aliases: HashMap<String, String>,
}

impl AlgorithmRegistry {
    /// Registry with no algorithms.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in algorithm.
    ///
    /// HS256/384/512, RS256/384/512, PS256/384/512, ES256/384, EdDSA (alias
    /// `ED25519`) and `none`.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();

        for hmac in [HmacAlgorithm::HS256, HmacAlgorithm::HS384, HmacAlgorithm::HS512] {
            registry.register_algorithm(hmac.name(), AlgorithmFamily::Hmac, KeyKind::Secret, hmac);
        }
        for rsa in [
            RsaAlgorithm::RS256,
            RsaAlgorithm::RS384,
            RsaAlgorithm::RS512,
            RsaAlgorithm::PS256,
            RsaAlgorithm::PS384,
            RsaAlgorithm::PS512,
        ] {
            registry.register_algorithm(rsa.name(), AlgorithmFamily::Rsa, KeyKind::Rsa, rsa);
        }
        registry.register_algorithm(
            "ES256",
            AlgorithmFamily::Ecdsa,
            KeyKind::EcP256,
            EcdsaAlgorithm::ES256,
        );
        registry.register_algorithm(
            "ES384",
            AlgorithmFamily::Ecdsa,
            KeyKind::EcP384,
            EcdsaAlgorithm::ES384,
        );
        registry.register_algorithm(
            "EdDSA",
            AlgorithmFamily::EdDsa,
            KeyKind::Ed25519,
            Ed25519Algorithm,
        );
        registry.alias("ED25519", "EdDSA");
        registry.register_algorithm(
            "none",
            AlgorithmFamily::None,
            KeyKind::Unsecured,
            NoneAlgorithm,
        );

        registry
    }

    /// Add or replace a descriptor under its own name.
    pub fn register(&mut self, descriptor: AlgorithmDescriptor) -> &mut Self {
        self.descriptors
            .insert(descriptor.name().to_string(), descriptor);
        self
    }

    /// Convenience for [`register`](Self::register) from parts.
    pub fn register_algorithm(
        &mut self,
        name: &str,
        family: AlgorithmFamily,
        key_kind: KeyKind,
        algorithm: impl SignatureAlgorithm,
    ) -> &mut Self {
        self.register(AlgorithmDescriptor::new(
            name,
            family,
            key_kind,
            Arc::new(algorithm),
        ))
    }

    /// Make `alias` resolve to the descriptor registered as `canonical`.
    pub fn alias(&mut self, alias: &str, canonical: &str) -> &mut Self {
        self.aliases
            .insert(alias.to_string(), canonical.to_string());
        self
    }

    /// Canonical header name for `name`, following one alias hop.
    /// `None` when neither a descriptor nor an alias exists.
    #[must_use]
    pub fn canonical_name<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.descriptors.contains_key(name) {
            return Some(name);
        }
        let target = self.aliases.get(name)?;
        self.descriptors
            .contains_key(target.as_str())
            .then_some(target.as_str())
    }

    /// Look up a descriptor by name or alias.
    ///
    /// # Errors
    /// Returns [`JwtError::UnsupportedAlgorithm`] when nothing is registered
    /// under `name`.
    pub fn get(&self, name: &str) -> JwtResult<&AlgorithmDescriptor> {
        self.canonical_name(name)
            .and_then(|canonical| self.descriptors.get(canonical))
            .ok_or_else(|| JwtError::unsupported_algorithm(name))
    }

    /// True when `name` resolves to a descriptor.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.canonical_name(name).is_some()
    }

    /// Registered canonical names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.descriptors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
