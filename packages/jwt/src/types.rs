//! JWT header and decoded token types

use crate::claims::Claims;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default `typ` header value.
pub const DEFAULT_TYPE: &str = "JWT";

/// JWT header: an ordered JSON object.
///
/// Tokens built here always carry `typ` then `alg`, then `kid` when set,
/// then any extra members. Headers read from a token are kept exactly as
/// received; the accessors return `None` for a member that is absent or is
/// not a string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JwtHeader(Map<String, Value>);

impl JwtHeader {
    /// Header `{"typ":"JWT","alg":alg}`.
    #[must_use]
    pub fn new(alg: &str) -> Self {
        let mut members = Map::new();
        members.insert("typ".to_string(), Value::from(DEFAULT_TYPE));
        members.insert("alg".to_string(), Value::from(alg));
        Self(members)
    }

    /// Set the key id.
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.0.insert("kid".to_string(), Value::String(kid.into()));
        self
    }

    /// Set the token type. Keeps its position ahead of `alg`.
    #[must_use]
    pub fn with_type(mut self, typ: impl Into<String>) -> Self {
        self.0.insert("typ".to_string(), Value::String(typ.into()));
        self
    }

    /// Append members not already present.
    #[must_use]
    pub fn with_members(mut self, members: Map<String, Value>) -> Self {
        for (name, value) in members {
            self.0.entry(name).or_insert(value);
        }
        self
    }

    /// Algorithm identifier, when `alg` is a string.
    #[must_use]
    pub fn alg(&self) -> Option<&str> {
        self.string_member("alg")
    }

    /// Token type, when `typ` is a string.
    #[must_use]
    pub fn typ(&self) -> Option<&str> {
        self.string_member("typ")
    }

    /// Key id, when `kid` is a string.
    #[must_use]
    pub fn kid(&self) -> Option<&str> {
        self.string_member("kid")
    }

    /// Any header member, whatever its type.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Borrow the members.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the members.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// True for unsigned tokens.
    #[must_use]
    pub fn is_unsecured(&self) -> bool {
        self.alg() == Some("none")
    }

    fn string_member(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for JwtHeader {
    fn from(members: Map<String, Value>) -> Self {
        Self(members)
    }
}

/// Everything a complete verify or decode returns.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    /// Decoded header
    pub header: JwtHeader,
    /// Decoded payload
    pub payload: Claims,
    /// Signature segment exactly as it appeared in the token (base64url)
    pub signature: String,
}
