//! Algorithm confusion, malformed input and unsigned-token handling

#![allow(clippy::expect_used)]

mod common;

use jwtkit::{
    AlgorithmFamily, AlgorithmRegistry, Jwt, JwtError, JwtResult, Key, KeyKind, SignOptions,
    SignatureAlgorithm, VerifyOptions, encoding::encode_segment,
};
use serde_json::json;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Accepts every signature and counts how often it is asked.
struct CountingAlgorithm {
    calls: Arc<AtomicUsize>,
}

impl SignatureAlgorithm for CountingAlgorithm {
    fn sign(&self, _message: &[u8], _key: &Key) -> JwtResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![1, 2, 3])
    }

    fn verify(&self, _message: &[u8], _signature: &[u8], _key: &Key) -> JwtResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

fn counting_jwt() -> (Jwt, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = AlgorithmRegistry::empty();
    registry.register_algorithm(
        "TEST",
        AlgorithmFamily::Hmac,
        KeyKind::Secret,
        CountingAlgorithm {
            calls: Arc::clone(&calls),
        },
    );
    (Jwt::with_registry(registry), calls)
}

#[test]
fn test_fake_algorithm_is_reachable_through_registry() {
    let (jwt, calls) = counting_jwt();
    let key = common::secret();
    let token = jwt
        .sign(&json!({"a": 1}), &key, &SignOptions::new("TEST"))
        .expect("sign");
    assert!(jwt.verify(&token, &key, &VerifyOptions::new(["TEST"])).is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // Standard algorithms are absent from a custom registry.
    assert_eq!(
        jwt.sign(&json!({}), &key, &SignOptions::new("HS256")),
        Err(JwtError::unsupported_algorithm("HS256"))
    );
}

#[test]
fn test_malformed_tokens_never_reach_crypto() {
    let (jwt, calls) = counting_jwt();
    let key = common::secret();
    let options = VerifyOptions::new(["TEST"]);
    let valid = jwt
        .sign(&json!({}), &key, &SignOptions::new("TEST"))
        .expect("sign");
    calls.store(0, Ordering::SeqCst);

    let header = encode_segment(br#"{"alg":"TEST","typ":"JWT"}"#);
    let payload = encode_segment(b"{}");
    let malformed = [
        "fruit.fruit.fruit".to_string(),
        format!("{valid}.extra"),
        "a.b".to_string(),
        String::new(),
        format!("{header}.{payload}"),
        format!(".{payload}.AQID"),
        format!("{header}..AQID"),
        format!("{header}.{payload}."),
        format!("{header}.{payload}.AQ=="),
        format!("{header}.{}.AQID", encode_segment(b"not json")),
        format!("{header}.{}.AQID", encode_segment(b"[1,2]")),
        format!("{}.{payload}.AQID", encode_segment(b"\"TEST\"")),
        format!("{}.{payload}.AQID", encode_segment(br#"{"typ":"JWT"}"#)),
        format!("{}.{payload}.AQID", encode_segment(br#"{"alg":7}"#)),
    ];
    for token in &malformed {
        let result = jwt.verify(token, &key, &options);
        assert!(
            matches!(result, Err(JwtError::Malformed(_))),
            "{token:?} gave {result:?}"
        );
        assert!(result.is_err_and(|e| e.is_malformed()));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_allow_list_excludes_token_algorithm() {
    let jwt = Jwt::new();
    let token = jwt
        .sign(&json!({}), &common::secret(), &SignOptions::new("HS256"))
        .expect("sign");

    assert!(matches!(
        jwt.verify(&token, &common::secret(), &VerifyOptions::new(["RS256"])),
        Err(JwtError::InvalidAlgorithm(_))
    ));
    assert!(matches!(
        jwt.verify(&token, &common::secret(), &VerifyOptions::new(Vec::<String>::new())),
        Err(JwtError::InvalidAlgorithm(_))
    ));
    // Algorithm names are case-sensitive.
    assert!(matches!(
        jwt.verify(&token, &common::secret(), &VerifyOptions::new(["hs256"])),
        Err(JwtError::InvalidAlgorithm(_))
    ));
}

#[test]
fn test_hmac_token_with_rsa_public_key_as_secret() {
    // Classic confusion: the RSA public key bytes used as an HMAC secret.
    let jwt = Jwt::new();
    let forged_secret = Key::secret(common::RSA_PUBLIC.as_bytes().to_vec());
    let forged = jwt
        .sign(&json!({"sub": "admin"}), &forged_secret, &SignOptions::new("HS256"))
        .expect("sign");

    let rsa_public = common::public(common::RSA_PUBLIC);
    assert!(matches!(
        jwt.verify(&forged, &rsa_public, &VerifyOptions::new(["RS256"])),
        Err(JwtError::InvalidAlgorithm(_))
    ));
    assert!(matches!(
        jwt.verify(&forged, &rsa_public, &VerifyOptions::new(["RS256", "HS256"])),
        Err(JwtError::InvalidKey(_))
    ));
}

#[test]
fn test_key_shape_must_match_family() {
    let jwt = Jwt::new();
    let rsa = common::rsa();
    let ec = common::ec256();

    let cases: [(&str, &Key); 5] = [
        ("HS256", &rsa.private),
        ("RS256", &common::secret()),
        ("ES256", &rsa.private),
        ("ES384", &ec.private),
        ("EdDSA", &ec.private),
    ];
    for (alg, key) in cases {
        assert!(
            matches!(
                jwt.sign(&json!({}), key, &SignOptions::new(alg)),
                Err(JwtError::InvalidKey(_))
            ),
            "{alg}"
        );
    }

    assert!(matches!(
        jwt.sign(&json!({}), &rsa.public, &SignOptions::new("RS256")),
        Err(JwtError::InvalidKey(_))
    ));
    assert!(matches!(
        jwt.sign(&json!({}), &Key::secret(Vec::new()), &SignOptions::new("HS256")),
        Err(JwtError::InvalidKey(_))
    ));

    let token = jwt
        .sign(&json!({}), &ec.private, &SignOptions::new("ES256"))
        .expect("sign");
    assert!(matches!(
        jwt.verify(&token, &common::public(common::EC384_PUBLIC), &VerifyOptions::new(["ES256"])),
        Err(JwtError::InvalidKey(_))
    ));
}

#[test]
fn test_short_rsa_keys_need_explicit_opt_in() {
    let jwt = Jwt::new();
    let weak = common::private(common::RSA_1024_PRIVATE);
    assert_eq!(weak.rsa_modulus_bits(), Some(1024));

    assert!(matches!(
        jwt.sign(&json!({}), &weak, &SignOptions::new("RS256")),
        Err(JwtError::InvalidKey(_))
    ));
    let token = jwt
        .sign(
            &json!({}),
            &weak,
            &SignOptions::new("PS256").allow_insecure_key_sizes(),
        )
        .expect("opted in");
    assert!(jwt.verify(&token, &weak, &VerifyOptions::new(["PS256"])).is_ok());
}

#[test]
fn test_unsigned_tokens_require_explicit_opt_in() {
    let jwt = Jwt::new();

    // Signing "none" needs the Unsecured key.
    assert!(matches!(
        jwt.sign(&json!({}), &common::secret(), &SignOptions::new("none")),
        Err(JwtError::InvalidKey(_))
    ));
    let token = jwt
        .sign(&json!({"sub": "anon"}), &Key::Unsecured, &SignOptions::new("none"))
        .expect("sign");
    assert!(token.ends_with('.'));

    // Verifying needs both the allow-list entry and the Unsecured key.
    assert!(matches!(
        jwt.verify(&token, &common::secret(), &VerifyOptions::new(["HS256"])),
        Err(JwtError::InvalidAlgorithm(_))
    ));
    assert!(matches!(
        jwt.verify(&token, &common::secret(), &VerifyOptions::new(["none"])),
        Err(JwtError::InvalidKey(_))
    ));
    let claims = jwt
        .verify(&token, &Key::Unsecured, &VerifyOptions::new(["none"]))
        .expect("explicitly allowed");
    assert_eq!(claims.sub(), Some("anon"));
}

#[test]
fn test_signed_token_relabelled_as_none() {
    let jwt = Jwt::new();
    let token = jwt
        .sign(&json!({"sub": "x"}), &common::secret(), &SignOptions::new("HS256"))
        .expect("sign");
    let (_, rest) = token.split_once('.').expect("segments");
    let relabelled = format!(
        "{}.{rest}",
        encode_segment(br#"{"alg":"none","typ":"JWT"}"#)
    );

    assert_eq!(
        jwt.verify(&relabelled, &Key::Unsecured, &VerifyOptions::new(["none"])),
        Err(JwtError::InvalidSignature)
    );
}

#[test]
fn test_stripped_signature_is_malformed() {
    let jwt = Jwt::new();
    let token = jwt
        .sign(&json!({}), &common::secret(), &SignOptions::new("HS256"))
        .expect("sign");
    let (signing_input, _) = token.rsplit_once('.').expect("segments");
    assert_eq!(
        jwt.verify(
            &format!("{signing_input}."),
            &common::secret(),
            &VerifyOptions::new(["HS256"])
        ),
        Err(JwtError::malformed("jwt signature is required"))
    );
}

#[test]
fn test_allow_list_naming_unregistered_algorithm() {
    let jwt = Jwt::new();
    let token = format!(
        "{}.{}.AQID",
        encode_segment(br#"{"alg":"XS999"}"#),
        encode_segment(b"{}")
    );
    assert_eq!(
        jwt.verify(&token, &common::secret(), &VerifyOptions::new(["XS999"])),
        Err(JwtError::unsupported_algorithm("XS999"))
    );
}

/// HS256 token over a hand-written header, signed with the shared test secret.
fn hs256_with_header(header: &str) -> String {
    let message = format!(
        "{}.{}",
        encode_segment(header.as_bytes()),
        encode_segment(br#"{"sub":"raw"}"#)
    );
    let signature = jwtkit::algorithms::HmacAlgorithm::HS256
        .sign(message.as_bytes(), &common::secret())
        .expect("sign");
    format!("{message}.{}", encode_segment(&signature))
}

#[test]
fn test_header_members_of_any_type_verify() {
    let jwt = Jwt::new();
    for header in [
        r#"{"alg":"HS256","typ":1}"#,
        r#"{"alg":"HS256","kid":7}"#,
        r#"{"alg":"HS256","typ":null,"kid":{"id":"k"},"crit":[]}"#,
    ] {
        let token = hs256_with_header(header);
        let claims = jwt
            .verify(&token, &common::secret(), &VerifyOptions::new(["HS256"]))
            .expect(header);
        assert_eq!(claims.sub(), Some("raw"));

        let decoded = jwt.decode_complete(&token).expect(header);
        assert_eq!(decoded.header.alg(), Some("HS256"));
        assert_eq!(decoded.header.typ(), None);
        assert_eq!(decoded.header.kid(), None);
    }
}

#[test]
fn test_header_without_string_alg_is_invalid_algorithm() {
    let jwt = Jwt::new();
    for header in [r#"{"typ":"JWT"}"#, r#"{"alg":256}"#, r#"{"alg":["HS256"]}"#] {
        let token = hs256_with_header(header);
        assert!(
            matches!(
                jwt.verify(&token, &common::secret(), &VerifyOptions::new(["HS256"])),
                Err(JwtError::InvalidAlgorithm(_))
            ),
            "{header}"
        );
        let claims = jwt.decode(&token).expect(header);
        assert_eq!(claims.sub(), Some("raw"));
    }
}
