//! JWT claims and builder
//!
//! [`Claims`] is the decoded payload: an ordered JSON object. Registered
//! claims get typed accessors; everything else is reachable through
//! [`Claims::get`] or by deserializing into a caller type with
//! [`Claims::into_typed`].

use crate::error::{JwtError, JwtResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Registered claim names.
pub mod names {
    /// Expiration time
    pub const EXP: &str = "exp";
    /// Not before
    pub const NBF: &str = "nbf";
    /// Issued at
    pub const IAT: &str = "iat";
    /// Audience
    pub const AUD: &str = "aud";
    /// Issuer
    pub const ISS: &str = "iss";
    /// Subject
    pub const SUB: &str = "sub";
    /// JWT ID
    pub const JTI: &str = "jti";
    /// OpenID Connect nonce
    pub const NONCE: &str = "nonce";
}

/// Decoded JWT payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a [`ClaimsBuilder`].
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::new()
    }

    /// Claims from any serializable value that serializes to a JSON object.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidPayload`] when the value is not an object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> JwtResult<Self> {
        Self::from_value(serde_json::to_value(value)?)
    }

    /// Claims from a JSON value.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidPayload`] when the value is not an object.
    pub fn from_value(value: Value) -> JwtResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(JwtError::invalid_payload("payload must be a JSON object")),
        }
    }

    /// Claim by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// True when the claim is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set a claim, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Remove a claim.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Number of claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no claims.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Claims in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying JSON object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Consume into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Deserialize into a caller-defined claims type.
    ///
    /// # Errors
    /// Returns [`JwtError::Serialization`] when the claims do not fit `T`.
    pub fn into_typed<T: DeserializeOwned>(self) -> JwtResult<T> {
        Ok(serde_json::from_value(Value::Object(self.0))?)
    }

    /// `exp` as unix seconds, when numeric.
    #[must_use]
    pub fn exp(&self) -> Option<i64> {
        self.numeric(names::EXP)
    }

    /// `nbf` as unix seconds, when numeric.
    #[must_use]
    pub fn nbf(&self) -> Option<i64> {
        self.numeric(names::NBF)
    }

    /// `iat` as unix seconds, when numeric.
    #[must_use]
    pub fn iat(&self) -> Option<i64> {
        self.numeric(names::IAT)
    }

    /// `iss`, when a string.
    #[must_use]
    pub fn iss(&self) -> Option<&str> {
        self.string(names::ISS)
    }

    /// `sub`, when a string.
    #[must_use]
    pub fn sub(&self) -> Option<&str> {
        self.string(names::SUB)
    }

    /// `jti`, when a string.
    #[must_use]
    pub fn jti(&self) -> Option<&str> {
        self.string(names::JTI)
    }

    /// `nonce`, when a string.
    #[must_use]
    pub fn nonce(&self) -> Option<&str> {
        self.string(names::NONCE)
    }

    /// `aud` as a list. A scalar audience is a one-element list; non-string
    /// members are skipped.
    #[must_use]
    pub fn audience(&self) -> Vec<&str> {
        match self.0.get(names::AUD) {
            Some(Value::String(aud)) => vec![aud.as_str()],
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    fn numeric(&self, name: &str) -> Option<i64> {
        self.0.get(name).and_then(numeric_date)
    }

    fn string(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Claims> for Value {
    fn from(claims: Claims) -> Self {
        claims.into_value()
    }
}

impl TryFrom<Value> for Claims {
    type Error = JwtError;

    fn try_from(value: Value) -> JwtResult<Self> {
        Self::from_value(value)
    }
}

impl<'a> IntoIterator for &'a Claims {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A JSON number read as whole unix seconds (fractions floored).
pub(crate) fn numeric_date(value: &Value) -> Option<i64> {
    if let Some(secs) = value.as_i64() {
        return Some(secs);
    }
    let secs = value.as_f64()?.floor();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    (secs.is_finite() && secs >= i64::MIN as f64 && secs < i64::MAX as f64).then_some(secs as i64)
}

/// Builder for [`Claims`].
#[derive(Debug, Clone, Default)]
pub struct ClaimsBuilder {
    claims: Claims,
}

impl ClaimsBuilder {
    /// Create a new claims builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subject (sub) claim.
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.claims.insert(names::SUB, sub.into());
        self
    }

    /// Set the issuer (iss) claim.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.claims.insert(names::ISS, iss.into());
        self
    }

    /// Set a single audience (aud) claim.
    #[must_use]
    pub fn audience(mut self, aud: impl Into<String>) -> Self {
        self.claims.insert(names::AUD, aud.into());
        self
    }

    /// Set a multi-valued audience (aud) claim.
    #[must_use]
    pub fn audiences<I, S>(mut self, aud: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<Value> = aud.into_iter().map(|a| Value::String(a.into())).collect();
        self.claims.insert(names::AUD, values);
        self
    }

    /// Set the JWT ID (jti) claim.
    #[must_use]
    pub fn jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.claims.insert(names::JTI, jti.into());
        self
    }

    /// Set the nonce claim.
    #[must_use]
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.claims.insert(names::NONCE, nonce.into());
        self
    }

    /// Set the expiration (exp) claim.
    #[must_use]
    pub fn expires_at(mut self, exp: DateTime<Utc>) -> Self {
        self.claims.insert(names::EXP, exp.timestamp());
        self
    }

    /// Set the not-before (nbf) claim.
    #[must_use]
    pub fn not_before(mut self, nbf: DateTime<Utc>) -> Self {
        self.claims.insert(names::NBF, nbf.timestamp());
        self
    }

    /// Set the issued-at (iat) claim.
    #[must_use]
    pub fn issued_at(mut self, iat: DateTime<Utc>) -> Self {
        self.claims.insert(names::IAT, iat.timestamp());
        self
    }

    /// Add a custom claim.
    #[must_use]
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(name, value);
        self
    }

    /// Build the claims.
    #[must_use]
    pub fn build(self) -> Claims {
        self.claims
    }
}
