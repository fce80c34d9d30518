//! Token decoding and verification
//!
//! [`TokenParser::deserialize`] is the structural decoder: it splits
//! the wire string, decodes the segments, and builds a [`Token`]
//! without touching any cryptography. [`TokenParser::verify_and_deserialize`]
//! adds the full trust chain on top: key resolution, signature
//! verification against the literal wire segments, the validity-window
//! check, and the audience check. All four checks are mandatory and
//! short-circuit on the first failure.

use crate::audience::AudienceChecker;
use crate::claims::ClaimSet;
use crate::clock::{check_validity_window, Clock};
use crate::crypto::KeyLocator;
use crate::error::{Error, Result};
use crate::token::{Header, Token};
use crate::utils::base64url;

use serde_json::{Map, Value};
use std::sync::Arc;

/// Decoder and verifier for the three-segment wire format
///
/// Holds only shared read-only capability objects, so one parser may
/// serve concurrent verification calls.
pub struct TokenParser {
    clock: Arc<dyn Clock>,
    locator: Arc<dyn KeyLocator>,
    audience: Arc<dyn AudienceChecker>,
}

impl TokenParser {
    /// Create a parser from its collaborators
    pub fn new(
        clock: Arc<dyn Clock>,
        locator: Arc<dyn KeyLocator>,
        audience: Arc<dyn AudienceChecker>,
    ) -> Self {
        Self {
            clock,
            locator,
            audience,
        }
    }

    /// Decode a wire string into a [`Token`] without verifying anything
    ///
    /// The signature segment is decoded to bytes and retained on the
    /// token but not checked. The returned token must not be trusted
    /// until it has passed [`TokenParser::verify_and_deserialize`].
    pub fn deserialize(&self, token: &str) -> Result<Token> {
        let (header_b64, claims_b64, signature_b64) = split_segments(token)?;

        let header_json = base64url::decode(header_b64)?;
        let header: Header = serde_json::from_slice(&header_json)
            .map_err(|e| Error::MalformedPayload(format!("invalid header: {e}")))?;

        let claims_json = base64url::decode(claims_b64)?;
        let params: Map<String, Value> = serde_json::from_slice(&claims_json)
            .map_err(|e| Error::MalformedPayload(format!("invalid claim set: {e}")))?;

        let signature = base64url::decode(signature_b64)?;

        Ok(Token::from_parts(
            header,
            ClaimSet::from_map(params),
            signature,
        ))
    }

    /// Decode a wire string and verify the full trust chain
    ///
    /// 1. Structural decode, as [`TokenParser::deserialize`]
    /// 2. Resolve verifiers for the declared issuer and key id;
    ///    [`Error::UnknownKey`] if none
    /// 3. Verify the signature over the literal `header.claims`
    ///    substring of the wire string, never a re-derived encoding;
    ///    [`Error::SignatureMismatch`] if no candidate validates
    /// 4. Validity-window check against this parser's clock
    /// 5. Audience check
    pub fn verify_and_deserialize(&self, token: &str) -> Result<Token> {
        let decoded = self.deserialize(token)?;
        let (header_b64, claims_b64, _) = split_segments(token)?;

        let issuer = decoded.claims().issuer()?;
        let key_id = decoded.header().key_id();
        let verifiers = self.locator.resolve(issuer, key_id);
        if verifiers.is_empty() {
            return Err(Error::UnknownKey {
                issuer: issuer.map(str::to_string),
                key_id: key_id.map(str::to_string),
            });
        }

        let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];
        if !verifiers
            .iter()
            .any(|v| v.verify(signing_input.as_bytes(), decoded.signature()).is_ok())
        {
            return Err(Error::SignatureMismatch);
        }

        check_validity_window(
            decoded.issued_at()?,
            decoded.expiration()?,
            self.clock.now(),
            self.clock.skew_tolerance(),
        )?;

        self.audience.check(decoded.audience()?)?;

        Ok(decoded)
    }
}

/// Split a wire string into its three segments
///
/// Requires exactly three non-empty segments. Runs before any decoding,
/// so an empty signature segment fails here even when the header is
/// also corrupt.
fn split_segments(token: &str) -> Result<(&str, &str, &str)> {
    let mut parts = token.split('.');
    let (Some(header), Some(claims), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::FormatInvalid);
    };

    if header.is_empty() || claims.is_empty() || signature.is_empty() {
        return Err(Error::FormatInvalid);
    }

    Ok((header, claims, signature))
}
