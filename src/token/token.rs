//! The token: header + claim set, and the sign-path encoder

use crate::claims::ClaimSet;
use crate::clock::{check_validity_window, Clock};
use crate::crypto::Signer;
use crate::error::{Error, Result};
use crate::token::{Header, TOKEN_TYPE};
use crate::utils::base64url;

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A token: header, claim set, and (once signed or parsed) a signature
///
/// Two lifecycles share this type:
///
/// - **Signing**: constructed from a [`Signer`] and [`Clock`] via
///   [`Token::new`], populated through the claim setters, then frozen
///   into wire form by [`Token::serialize_and_sign`]. A token under
///   construction belongs to one owner; the setters take `&mut self`.
/// - **Verification**: built by the parser from decoded wire segments,
///   immutable to its caller, and discarded after use.
pub struct Token {
    header: Header,
    claims: ClaimSet,
    signature: Vec<u8>,
    signer: Option<Arc<dyn Signer>>,
    clock: Option<Arc<dyn Clock>>,
}

impl Token {
    /// Create an empty token for signing
    ///
    /// The header is derived from the signer (algorithm, key id, type
    /// tag) and the signer's issuer, if any, is stamped into the `iss`
    /// claim.
    pub fn new(signer: Arc<dyn Signer>, clock: Arc<dyn Clock>) -> Self {
        let header = Header {
            algorithm: signer.algorithm(),
            key_id: signer.key_id().map(str::to_string),
            token_type: Some(TOKEN_TYPE.to_string()),
        };
        let mut claims = ClaimSet::new();
        if let Some(issuer) = signer.issuer() {
            claims.set_issuer(issuer);
        }
        Self {
            header,
            claims,
            signature: Vec::new(),
            signer: Some(signer),
            clock: Some(clock),
        }
    }

    /// Build a token from decoded wire segments (parse path)
    pub(crate) fn from_parts(header: Header, claims: ClaimSet, signature: Vec<u8>) -> Self {
        Self {
            header,
            claims,
            signature,
            signer: None,
            clock: None,
        }
    }

    /// The token header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The claim set
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Decoded signature bytes; empty until signed or parsed
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Issuer (`iss` claim)
    pub fn issuer(&self) -> Result<Option<&str>> {
        self.claims.issuer()
    }

    /// Audience (`aud` claim)
    pub fn audience(&self) -> Result<Option<&str>> {
        self.claims.audience()
    }

    /// Issued-at time (`iat` claim), epoch seconds
    pub fn issued_at(&self) -> Result<Option<i64>> {
        self.claims.issued_at()
    }

    /// Expiration time (`exp` claim), epoch seconds
    pub fn expiration(&self) -> Result<Option<i64>> {
        self.claims.expiration()
    }

    /// Raw value of an application claim
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Application claim as a string
    pub fn param_as_str(&self, name: &str) -> Result<Option<&str>> {
        self.claims.get_str(name)
    }

    /// Application claim as an integer
    pub fn param_as_i64(&self, name: &str) -> Result<Option<i64>> {
        self.claims.get_i64(name)
    }

    /// Application claim as a boolean
    pub fn param_as_bool(&self, name: &str) -> Result<Option<bool>> {
        self.claims.get_bool(name)
    }

    /// Set an application claim
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.claims.set(name, value);
    }

    /// Set the audience (`aud` claim)
    pub fn set_audience(&mut self, audience: impl Into<String>) {
        self.claims.set_audience(audience);
    }

    /// Set the issued-at time (`iat` claim), whole epoch seconds
    pub fn set_issued_at(&mut self, seconds: i64) {
        self.claims.set_issued_at(seconds);
    }

    /// Set the expiration time (`exp` claim), whole epoch seconds
    pub fn set_expiration(&mut self, seconds: i64) {
        self.claims.set_expiration(seconds);
    }

    /// The exact bytes that get signed: base64url(header) + "." +
    /// base64url(claims)
    pub fn signing_input(&self) -> Result<String> {
        let header_json =
            serde_json::to_string(&self.header).map_err(|e| Error::SigningFailure(e.to_string()))?;
        let claims_json = self.claims.to_json()?;
        Ok(format!(
            "{}.{}",
            base64url::encode(header_json),
            base64url::encode(claims_json)
        ))
    }

    /// Encode and sign this token into its three-segment wire form
    ///
    /// Refuses to produce a token whose own stated validity window is
    /// already invalid relative to the signer's clock; the same check
    /// runs again at verification time against the relying party's
    /// clock. Each call re-signs; nothing is cached on the token.
    pub fn serialize_and_sign(&self) -> Result<String> {
        let signer = self
            .signer
            .as_deref()
            .ok_or_else(|| Error::SigningFailure("token was not constructed with a signer".into()))?;
        let clock = self
            .clock
            .as_deref()
            .ok_or_else(|| Error::SigningFailure("token was not constructed with a clock".into()))?;

        check_validity_window(
            self.claims.issued_at()?,
            self.claims.expiration()?,
            clock.now(),
            clock.skew_tolerance(),
        )?;

        let signing_input = self.signing_input()?;
        let signature = signer.sign(signing_input.as_bytes())?;
        Ok(format!("{}.{}", signing_input, base64url::encode(signature)))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("header", &self.header)
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::crypto::HmacSha256Signer;

    const T: i64 = 1_276_669_722;
    const SECRET: &[u8] = b"test-secret";

    fn signer() -> Arc<dyn Signer> {
        Arc::new(HmacSha256Signer::new(
            Some("google.com".into()),
            Some("key2".into()),
            SECRET,
        ))
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(T, 60))
    }

    #[test]
    fn header_and_issuer_stamped_from_signer() {
        let token = Token::new(signer(), clock());
        assert_eq!(token.header().algorithm.name(), "HS256");
        assert_eq!(token.header().key_id(), Some("key2"));
        assert_eq!(token.header().token_type.as_deref(), Some(TOKEN_TYPE));
        assert_eq!(token.issuer().unwrap(), Some("google.com"));
    }

    #[test]
    fn signing_input_is_dot_joined_base64url() {
        let mut token = Token::new(signer(), clock());
        token.set_param("foo", "some value");

        let signing_input = token.signing_input().unwrap();
        let parts: Vec<&str> = signing_input.split('.').collect();
        assert_eq!(parts.len(), 2);

        let header = String::from_utf8(base64url::decode(parts[0]).unwrap()).unwrap();
        assert_eq!(header, r#"{"alg":"HS256","kid":"key2","typ":"JWT"}"#);
        let claims = String::from_utf8(base64url::decode(parts[1]).unwrap()).unwrap();
        assert_eq!(claims, r#"{"iss":"google.com","foo":"some value"}"#);
    }

    #[test]
    fn serialize_and_sign_produces_three_segments() {
        let mut token = Token::new(signer(), clock());
        token.set_issued_at(T);
        token.set_expiration(T + 3600);

        let wire = token.serialize_and_sign().unwrap();
        let parts: Vec<&str> = wire.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| !p.is_empty()));
        assert!(wire.starts_with(&token.signing_input().unwrap()));
    }

    #[test]
    fn each_call_resigns_identically_for_hmac() {
        let mut token = Token::new(signer(), clock());
        token.set_param("bar", 15);

        assert_eq!(
            token.serialize_and_sign().unwrap(),
            token.serialize_and_sign().unwrap()
        );
    }

    #[test]
    fn refuses_expired_window_at_sign_time() {
        let mut token = Token::new(signer(), clock());
        token.set_issued_at(T - 7200);
        token.set_expiration(T - 3600);

        let result = token.serialize_and_sign();
        assert!(matches!(result, Err(Error::Expired { .. })));
    }

    #[test]
    fn refuses_inverted_window_at_sign_time() {
        let mut token = Token::new(signer(), clock());
        token.set_issued_at(T);
        token.set_expiration(T - 1);

        let result = token.serialize_and_sign();
        assert!(matches!(result, Err(Error::IssuedAfterExpiration { .. })));
    }

    #[test]
    fn open_ended_token_signs() {
        let token = Token::new(signer(), clock());
        assert!(token.serialize_and_sign().is_ok());
    }

    #[test]
    fn signer_without_issuer_leaves_iss_absent() {
        let anonymous: Arc<dyn Signer> = Arc::new(HmacSha256Signer::new(None, None, b"secret"));
        let token = Token::new(anonymous, clock());
        assert_eq!(token.issuer().unwrap(), None);
        assert!(token.claims().is_empty());
        assert_eq!(token.header().key_id(), None);
    }
}
