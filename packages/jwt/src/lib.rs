//! JSON Web Tokens: sign, verify and decode
//!
//! - HS256/384/512, RS256/384/512, PS256/384/512, ES256/384, EdDSA and an
//!   opt-in `none`
//! - Verification against an explicit algorithm allow-list, then the
//!   signature, then the claims (`nbf`, `exp`, `maxAge`, `aud`, `iss`, `sub`,
//!   `jti`, `nonce`)
//! - Synchronous core with future and callback wrappers
//!
//! ```no_run
//! use jwtkit::{Jwt, Key, SignOptions, VerifyOptions};
//! use serde_json::json;
//!
//! # fn main() -> jwtkit::JwtResult<()> {
//! let jwt = Jwt::new();
//! let key = Key::secret(b"a sufficiently long shared secret".to_vec());
//!
//! let token = jwt.sign(
//!     &json!({"sub": "user-1"}),
//!     &key,
//!     &SignOptions::new("HS256").with_expires_in(3600),
//! )?;
//! let claims = jwt.verify(&token, &key, &VerifyOptions::new(["HS256"]))?;
//! assert_eq!(claims.sub(), Some("user-1"));
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod claims;
pub mod encoding;
mod error;
mod futures;
mod jwt;
pub mod keys;
pub mod options;
pub mod signer;
pub mod timespan;
mod types;
pub mod validation;
pub mod verifier;

pub use algorithms::{AlgorithmDescriptor, AlgorithmFamily, AlgorithmRegistry, SignatureAlgorithm};
pub use claims::{Claims, ClaimsBuilder};
pub use error::*;
pub use self::futures::AsyncJwtResult;
pub use jwt::Jwt;
pub use keys::{Key, KeyKind, PrivateKey, PublicKey, SecretKey};
pub use options::{AudienceMatcher, SignOptions, VerifyOptions};
pub use timespan::Timespan;
pub use types::*;
