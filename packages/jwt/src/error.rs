//! JWT error types
//!
//! Every failure surfaced by signing, verification and decoding maps onto one
//! variant of [`JwtError`]. Messages never carry token contents or key material.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// JWT error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Structural or encoding failure. Raised before any cryptographic work.
    #[error("jwt malformed: {0}")]
    Malformed(String),

    /// Algorithm is not present in the registry.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Algorithm is not in the caller's allow-list, or no allow-list was given.
    #[error("invalid algorithm: {0}")]
    InvalidAlgorithm(String),

    /// Key material does not match the shape the algorithm requires.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Cryptographic signature check failed.
    #[error("invalid signature")]
    InvalidSignature,

    /// `exp` (or `iat + maxAge`) lies in the past.
    #[error("jwt expired at {expired_at}")]
    TokenExpired {
        /// Instant the token stopped being valid
        expired_at: DateTime<Utc>,
    },

    /// `nbf` lies in the future.
    #[error("jwt not active until {date}")]
    NotBefore {
        /// Instant the token becomes valid
        date: DateTime<Utc>,
    },

    /// Claim content mismatch: audience, issuer, subject, jwt id, nonce or a
    /// registered claim of the wrong type.
    #[error("{0}")]
    InvalidClaim(String),

    /// A sign option and a payload claim both try to set the same field.
    #[error("claim conflict: {0}")]
    ClaimConflict(String),

    /// Sign or verify options are unusable (e.g. an unparsable timespan).
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Payload handed to `sign` is not an object or carries a registered
    /// claim of the wrong JSON type.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal failure, e.g. a background task dropped its result channel.
    #[error("internal error: {0}")]
    Internal(String),
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: &str) -> Self {
        JwtError::Malformed(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create an invalid algorithm error
    #[inline]
    #[must_use]
    pub fn invalid_algorithm(msg: &str) -> Self {
        JwtError::InvalidAlgorithm(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwtError::InvalidKey(msg.to_string())
    }

    /// Create an invalid claim error
    #[inline]
    #[must_use]
    pub fn invalid_claim(msg: &str) -> Self {
        JwtError::InvalidClaim(msg.to_string())
    }

    /// Create a claim conflict error
    #[inline]
    #[must_use]
    pub fn claim_conflict(msg: &str) -> Self {
        JwtError::ClaimConflict(msg.to_string())
    }

    /// Create an invalid options error
    #[inline]
    #[must_use]
    pub fn invalid_options(msg: &str) -> Self {
        JwtError::InvalidOptions(msg.to_string())
    }

    /// Create an invalid payload error
    #[inline]
    #[must_use]
    pub fn invalid_payload(msg: &str) -> Self {
        JwtError::InvalidPayload(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwtError::Serialization(msg.to_string())
    }

    /// Create an internal error
    #[inline]
    #[must_use]
    pub fn internal(msg: &str) -> Self {
        JwtError::Internal(msg.to_string())
    }

    /// Create a token expired error for a unix timestamp
    #[must_use]
    pub fn token_expired(expired_at: i64) -> Self {
        JwtError::TokenExpired {
            expired_at: datetime_from_timestamp(expired_at),
        }
    }

    /// Create a not-before error for a unix timestamp
    #[must_use]
    pub fn not_before(date: i64) -> Self {
        JwtError::NotBefore {
            date: datetime_from_timestamp(date),
        }
    }

    /// True for structural failures that never reached cryptography.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, JwtError::Malformed(_))
    }

    /// True for failures caused by the token's validity window.
    #[must_use]
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            JwtError::TokenExpired { .. } | JwtError::NotBefore { .. }
        )
    }
}

impl From<serde_json::Error> for JwtError {
    fn from(err: serde_json::Error) -> Self {
        JwtError::Serialization(err.to_string())
    }
}

/// Timestamps outside chrono's range are clamped to its bounds.
fn datetime_from_timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or(if secs < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
