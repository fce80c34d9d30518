//! Ordered claim storage with typed access
//!
//! A [`ClaimSet`] is an order-preserving mapping from claim name to a
//! JSON value. Insertion order is the serialization order, which
//! matters because the signing input is the literal encoded claims and
//! a re-encoding that reorders keys would invalidate the signature.
//!
//! Reserved claim names (`iss`, `aud`, `iat`, `exp`) have dedicated
//! typed accessors; all other names are free-form application claims
//! read through the generic `get_*` accessors. Reading a claim at the
//! wrong JSON type fails with [`Error::TypeMismatch`]; an absent claim
//! or a JSON `null` reads as `None`.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Reserved claim name: issuer
pub const ISSUER: &str = "iss";
/// Reserved claim name: audience
pub const AUDIENCE: &str = "aud";
/// Reserved claim name: issued-at, seconds since the Unix epoch
pub const ISSUED_AT: &str = "iat";
/// Reserved claim name: expiration, seconds since the Unix epoch
pub const EXPIRATION: &str = "exp";

/// An ordered set of named claims
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimSet {
    params: Map<String, Value>,
}

impl ClaimSet {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_map(params: Map<String, Value>) -> Self {
        Self { params }
    }

    /// Set a claim, replacing any previous value under the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(name.into(), value.into());
    }

    /// Remove a claim, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.params.remove(name)
    }

    /// Get a claim's raw JSON value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Claim names in serialization order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the claim set holds no claims
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get a claim as a string
    pub fn get_str(&self, name: &str) -> Result<Option<&str>> {
        match self.params.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(Error::TypeMismatch {
                claim: name.to_string(),
                expected: "string",
            }),
        }
    }

    /// Get a claim as a signed 64-bit integer
    pub fn get_i64(&self, name: &str) -> Result<Option<i64>> {
        match self.params.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or(Error::TypeMismatch {
                claim: name.to_string(),
                expected: "integer",
            }),
            Some(_) => Err(Error::TypeMismatch {
                claim: name.to_string(),
                expected: "integer",
            }),
        }
    }

    /// Get a claim as a boolean
    pub fn get_bool(&self, name: &str) -> Result<Option<bool>> {
        match self.params.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(Error::TypeMismatch {
                claim: name.to_string(),
                expected: "boolean",
            }),
        }
    }

    /// Get the issuer (`iss` claim)
    pub fn issuer(&self) -> Result<Option<&str>> {
        self.get_str(ISSUER)
    }

    /// Get the audience (`aud` claim)
    pub fn audience(&self) -> Result<Option<&str>> {
        self.get_str(AUDIENCE)
    }

    /// Get the issued-at time (`iat` claim) as epoch seconds
    pub fn issued_at(&self) -> Result<Option<i64>> {
        self.get_i64(ISSUED_AT)
    }

    /// Get the expiration time (`exp` claim) as epoch seconds
    pub fn expiration(&self) -> Result<Option<i64>> {
        self.get_i64(EXPIRATION)
    }

    /// Set the issuer (`iss` claim)
    pub fn set_issuer(&mut self, issuer: impl Into<String>) {
        self.set(ISSUER, Value::String(issuer.into()));
    }

    /// Set the audience (`aud` claim)
    pub fn set_audience(&mut self, audience: impl Into<String>) {
        self.set(AUDIENCE, Value::String(audience.into()));
    }

    /// Set the issued-at time (`iat` claim), whole epoch seconds
    pub fn set_issued_at(&mut self, seconds: i64) {
        self.set(ISSUED_AT, Value::from(seconds));
    }

    /// Set the expiration time (`exp` claim), whole epoch seconds
    pub fn set_expiration(&mut self, seconds: i64) {
        self.set(EXPIRATION, Value::from(seconds));
    }

    /// Serialize to canonical JSON text, preserving insertion order
    pub(crate) fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.params).map_err(|e| Error::SigningFailure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_and_get_typed_claims() {
        let mut claims = ClaimSet::new();
        claims.set("foo", "some value");
        claims.set("bar", 15);
        claims.set("flag", true);

        assert_eq!(claims.get_str("foo").unwrap(), Some("some value"));
        assert_eq!(claims.get_i64("bar").unwrap(), Some(15));
        assert_eq!(claims.get_bool("flag").unwrap(), Some(true));
        assert_eq!(claims.get_str("missing").unwrap(), None);
    }

    #[test]
    fn wrong_type_fails_with_type_mismatch() {
        let mut claims = ClaimSet::new();
        claims.set("bar", 15);

        let result = claims.get_str("bar");
        assert!(matches!(result, Err(Error::TypeMismatch { expected: "string", .. })));

        claims.set("foo", "text");
        let result = claims.get_i64("foo");
        assert!(matches!(result, Err(Error::TypeMismatch { expected: "integer", .. })));

        // Floats do not coerce to integers
        claims.set("rate", 1.5);
        assert!(claims.get_i64("rate").is_err());
    }

    #[test]
    fn null_reads_as_absent() {
        let mut claims = ClaimSet::new();
        claims.set(ISSUER, Value::Null);
        assert_eq!(claims.issuer().unwrap(), None);
    }

    #[test]
    fn reserved_accessors() {
        let mut claims = ClaimSet::new();
        claims.set_issuer("google.com");
        claims.set_audience("http://www.google.com");
        claims.set_issued_at(1_276_669_722);
        claims.set_expiration(1_276_669_782);

        assert_eq!(claims.issuer().unwrap(), Some("google.com"));
        assert_eq!(claims.audience().unwrap(), Some("http://www.google.com"));
        assert_eq!(claims.issued_at().unwrap(), Some(1_276_669_722));
        assert_eq!(claims.expiration().unwrap(), Some(1_276_669_782));
    }

    #[test]
    fn serialization_preserves_insertion_order() {
        let mut claims = ClaimSet::new();
        claims.set_issuer("google.com");
        claims.set("bar", 15);
        claims.set("foo", "some value");
        claims.set_audience("http://www.google.com");

        assert_eq!(
            claims.to_json().unwrap(),
            r#"{"iss":"google.com","bar":15,"foo":"some value","aud":"http://www.google.com"}"#
        );
        let names: Vec<&str> = claims.names().collect();
        assert_eq!(names, ["iss", "bar", "foo", "aud"]);
    }

    #[test]
    fn nested_values_survive() {
        let mut claims = ClaimSet::new();
        claims.set("scopes", json!(["read", "write"]));
        claims.set("ctx", json!({"tenant": "acme"}));

        assert_eq!(claims.get("scopes"), Some(&json!(["read", "write"])));
        assert_eq!(claims.get("ctx").unwrap()["tenant"], json!("acme"));
    }
}
