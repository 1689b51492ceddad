//! Shared key fixtures for integration tests

#![allow(dead_code, clippy::expect_used)]

use jwtkit::Key;

pub const RSA_PRIVATE: &str = include_str!("../fixtures/rsa_private.pem");
pub const RSA_PKCS1_PRIVATE: &str = include_str!("../fixtures/rsa_pkcs1_private.pem");
pub const RSA_PUBLIC: &str = include_str!("../fixtures/rsa_public.pem");
pub const RSA_OTHER_PUBLIC: &str = include_str!("../fixtures/rsa_other_public.pem");
pub const RSA_1024_PRIVATE: &str = include_str!("../fixtures/rsa_1024_private.pem");
pub const EC256_PRIVATE: &str = include_str!("../fixtures/ec256_private.pem");
pub const EC256_SEC1_PRIVATE: &str = include_str!("../fixtures/ec256_sec1_private.pem");
pub const EC256_PUBLIC: &str = include_str!("../fixtures/ec256_public.pem");
pub const EC256_OTHER_PUBLIC: &str = include_str!("../fixtures/ec256_other_public.pem");
pub const EC384_PRIVATE: &str = include_str!("../fixtures/ec384_private.pem");
pub const EC384_PUBLIC: &str = include_str!("../fixtures/ec384_public.pem");
pub const EC384_OTHER_PUBLIC: &str = include_str!("../fixtures/ec384_other_public.pem");
pub const ED25519_PRIVATE: &str = include_str!("../fixtures/ed25519_private.pem");
pub const ED25519_PUBLIC: &str = include_str!("../fixtures/ed25519_public.pem");
pub const ED25519_OTHER_PUBLIC: &str = include_str!("../fixtures/ed25519_other_public.pem");
pub const EC256_PUBLIC_DER: &[u8] = include_bytes!("../fixtures/ec256_public.der");
pub const ED25519_PRIVATE_DER: &[u8] = include_bytes!("../fixtures/ed25519_private.der");

pub const SECRET: &[u8] = b"shhhhh-this-is-a-test-secret-of-reasonable-length";

/// A fixed "now" for deterministic time checks.
pub const NOW: i64 = 1_700_000_000;

/// Signing key, matching public key and a public key from a different pair.
pub struct KeySet {
    pub private: Key,
    pub public: Key,
    pub other_public: Key,
}

pub fn private(pem: &str) -> Key {
    Key::private_pem(pem).expect("fixture private key parses")
}

pub fn public(pem: &str) -> Key {
    Key::public_pem(pem).expect("fixture public key parses")
}

pub fn secret() -> Key {
    Key::secret(SECRET.to_vec())
}

pub fn rsa() -> KeySet {
    KeySet {
        private: private(RSA_PRIVATE),
        public: public(RSA_PUBLIC),
        other_public: public(RSA_OTHER_PUBLIC),
    }
}

pub fn ec256() -> KeySet {
    KeySet {
        private: private(EC256_PRIVATE),
        public: public(EC256_PUBLIC),
        other_public: public(EC256_OTHER_PUBLIC),
    }
}

pub fn ec384() -> KeySet {
    KeySet {
        private: private(EC384_PRIVATE),
        public: public(EC384_PUBLIC),
        other_public: public(EC384_OTHER_PUBLIC),
    }
}

pub fn ed25519() -> KeySet {
    KeySet {
        private: private(ED25519_PRIVATE),
        public: public(ED25519_PUBLIC),
        other_public: public(ED25519_OTHER_PUBLIC),
    }
}

pub fn hmac() -> KeySet {
    KeySet {
        private: secret(),
        public: secret(),
        other_public: Key::secret(b"a-completely-different-shared-secret".to_vec()),
    }
}

/// Key set for an algorithm name.
pub fn keys_for(alg: &str) -> KeySet {
    match alg {
        "HS256" | "HS384" | "HS512" => hmac(),
        "RS256" | "RS384" | "RS512" | "PS256" | "PS384" | "PS512" => rsa(),
        "ES256" => ec256(),
        "ES384" => ec384(),
        "EdDSA" | "ED25519" => ed25519(),
        other => panic!("no fixture keys for {other}"),
    }
}

pub const SIGNED_ALGORITHMS: [&str; 13] = [
    "HS256", "HS384", "HS512", "RS256", "RS384", "RS512", "PS256", "PS384", "PS512", "ES256",
    "ES384", "EdDSA", "ED25519",
];

pub const ASYMMETRIC_ALGORITHMS: [&str; 9] = [
    "RS256", "RS384", "RS512", "PS256", "PS384", "PS512", "ES256", "ES384", "EdDSA",
];
