//! Sign and verify options
//!
//! Plain structs with public fields plus chained `with_*` builders. The
//! algorithm is a required constructor argument in both cases: signing never
//! falls back to a default algorithm and verification never trusts the
//! token header alone.

use crate::{
    error::{JwtError, JwtResult},
    timespan::Timespan,
};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

/// Options for [`Jwt::sign`](crate::Jwt::sign).
#[derive(Debug, Clone)]
pub struct SignOptions {
    /// Algorithm name (registry name or alias)
    pub algorithm: String,
    /// Lifetime; sets `exp = iat + expires_in`
    pub expires_in: Option<Timespan>,
    /// Activation delay; sets `nbf = iat + not_before`
    pub not_before: Option<Timespan>,
    /// Audience claim; one value is written as a string, more as an array
    pub audience: Option<Vec<String>>,
    /// Issuer claim
    pub issuer: Option<String>,
    /// Subject claim
    pub subject: Option<String>,
    /// JWT ID claim
    pub jwt_id: Option<String>,
    /// Omit `iat`
    pub no_timestamp: bool,
    /// Override "now" (unix seconds) used for `iat`
    pub timestamp: Option<i64>,
    /// `kid` header member
    pub key_id: Option<String>,
    /// `typ` header member; `"JWT"` when unset
    pub typ: Option<String>,
    /// Additional header members
    pub header: Map<String, Value>,
    /// Allow RSA keys shorter than 2048 bits
    pub allow_insecure_key_sizes: bool,
}

impl SignOptions {
    /// Options for signing with `algorithm`.
    #[must_use]
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            expires_in: None,
            not_before: None,
            audience: None,
            issuer: None,
            subject: None,
            jwt_id: None,
            no_timestamp: false,
            timestamp: None,
            key_id: None,
            typ: None,
            header: Map::new(),
            allow_insecure_key_sizes: false,
        }
    }

    /// Set the token lifetime. Integers are seconds; parse strings such as
    /// `"2h"` with [`Timespan::parse`].
    #[must_use]
    pub fn with_expires_in(mut self, span: impl Into<Timespan>) -> Self {
        self.expires_in = Some(span.into());
        self
    }

    /// Set the activation delay.
    #[must_use]
    pub fn with_not_before(mut self, span: impl Into<Timespan>) -> Self {
        self.not_before = Some(span.into());
        self
    }

    /// Add an audience value.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience
            .get_or_insert_with(Vec::new)
            .push(audience.into());
        self
    }

    /// Set the issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the JWT ID.
    #[must_use]
    pub fn with_jwt_id(mut self, jwt_id: impl Into<String>) -> Self {
        self.jwt_id = Some(jwt_id.into());
        self
    }

    /// Do not write `iat`.
    #[must_use]
    pub fn no_timestamp(mut self) -> Self {
        self.no_timestamp = true;
        self
    }

    /// Use `timestamp` instead of the current time for `iat`.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the `kid` header member.
    #[must_use]
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    /// Set the `typ` header member.
    #[must_use]
    pub fn with_type(mut self, typ: impl Into<String>) -> Self {
        self.typ = Some(typ.into());
        self
    }

    /// Add a header member. `alg`, `typ` and `kid` are rejected at sign time.
    #[must_use]
    pub fn with_header_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.header.insert(name.into(), value.into());
        self
    }

    /// Accept RSA keys shorter than 2048 bits.
    #[must_use]
    pub fn allow_insecure_key_sizes(mut self) -> Self {
        self.allow_insecure_key_sizes = true;
        self
    }
}

/// One expected audience: an exact string or a regular expression.
#[derive(Clone)]
pub enum AudienceMatcher {
    /// Exact, case-sensitive match
    Literal(String),
    /// Regular expression; unanchored unless the pattern anchors itself
    Pattern(Regex),
}

impl AudienceMatcher {
    /// Compile a pattern matcher.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidOptions`] when the pattern does not compile.
    pub fn pattern(pattern: &str) -> JwtResult<Self> {
        Regex::new(pattern)
            .map(AudienceMatcher::Pattern)
            .map_err(|e| JwtError::invalid_options(&format!("invalid audience pattern: {e}")))
    }

    /// True when `audience` satisfies this matcher.
    #[must_use]
    pub fn matches(&self, audience: &str) -> bool {
        match self {
            AudienceMatcher::Literal(expected) => expected == audience,
            AudienceMatcher::Pattern(regex) => regex.is_match(audience),
        }
    }
}

impl fmt::Debug for AudienceMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudienceMatcher::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            AudienceMatcher::Pattern(r) => f.debug_tuple("Pattern").field(&r.as_str()).finish(),
        }
    }
}

impl fmt::Display for AudienceMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudienceMatcher::Literal(s) => f.write_str(s),
            AudienceMatcher::Pattern(r) => write!(f, "/{}/", r.as_str()),
        }
    }
}

impl From<&str> for AudienceMatcher {
    fn from(value: &str) -> Self {
        AudienceMatcher::Literal(value.to_string())
    }
}

impl From<String> for AudienceMatcher {
    fn from(value: String) -> Self {
        AudienceMatcher::Literal(value)
    }
}

impl From<Regex> for AudienceMatcher {
    fn from(value: Regex) -> Self {
        AudienceMatcher::Pattern(value)
    }
}

/// Options for [`Jwt::verify`](crate::Jwt::verify).
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Accepted algorithm names; must not be empty
    pub algorithms: Vec<String>,
    /// Expected audiences; any one matching any `aud` value passes
    pub audience: Option<Vec<AudienceMatcher>>,
    /// Accepted issuers
    pub issuer: Option<Vec<String>>,
    /// Expected subject
    pub subject: Option<String>,
    /// Expected JWT ID
    pub jwt_id: Option<String>,
    /// Expected nonce
    pub nonce: Option<String>,
    /// Seconds of slack for `nbf`, `exp` and `maxAge`
    pub clock_tolerance: i64,
    /// Override "now" (unix seconds)
    pub clock_timestamp: Option<i64>,
    /// Skip the `exp` check
    pub ignore_expiration: bool,
    /// Skip the `nbf` check
    pub ignore_not_before: bool,
    /// Maximum age measured from `iat`
    pub max_age: Option<Timespan>,
}

impl VerifyOptions {
    /// Options accepting exactly the given algorithms.
    #[must_use]
    pub fn new<I, S>(algorithms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            algorithms: algorithms.into_iter().map(Into::into).collect(),
            audience: None,
            issuer: None,
            subject: None,
            jwt_id: None,
            nonce: None,
            clock_tolerance: 0,
            clock_timestamp: None,
            ignore_expiration: false,
            ignore_not_before: false,
            max_age: None,
        }
    }

    /// Add an expected audience (literal or pattern).
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<AudienceMatcher>) -> Self {
        self.audience
            .get_or_insert_with(Vec::new)
            .push(audience.into());
        self
    }

    /// Add an accepted issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer.get_or_insert_with(Vec::new).push(issuer.into());
        self
    }

    /// Set the expected subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the expected JWT ID.
    #[must_use]
    pub fn with_jwt_id(mut self, jwt_id: impl Into<String>) -> Self {
        self.jwt_id = Some(jwt_id.into());
        self
    }

    /// Set the expected nonce.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Allow `seconds` of clock skew.
    #[must_use]
    pub fn with_clock_tolerance(mut self, seconds: i64) -> Self {
        self.clock_tolerance = seconds;
        self
    }

    /// Evaluate time claims as if the current time were `timestamp`.
    #[must_use]
    pub fn with_clock_timestamp(mut self, timestamp: i64) -> Self {
        self.clock_timestamp = Some(timestamp);
        self
    }

    /// Skip the `exp` check.
    #[must_use]
    pub fn ignore_expiration(mut self) -> Self {
        self.ignore_expiration = true;
        self
    }

    /// Skip the `nbf` check.
    #[must_use]
    pub fn ignore_not_before(mut self) -> Self {
        self.ignore_not_before = true;
        self
    }

    /// Reject tokens whose `iat` is older than `max_age`.
    #[must_use]
    pub fn with_max_age(mut self, max_age: impl Into<Timespan>) -> Self {
        self.max_age = Some(max_age.into());
        self
    }

    /// Reject option values that can never be satisfied.
    pub(crate) fn check(&self) -> JwtResult<()> {
        if self.clock_tolerance < 0 {
            return Err(JwtError::invalid_options(
                "clock tolerance must not be negative",
            ));
        }
        if self.nonce.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(JwtError::invalid_options("nonce must be a non-empty string"));
        }
        Ok(())
    }
}
