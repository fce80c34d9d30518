//! Signature algorithms and key resolution
//!
//! Signing and verification are capability interfaces with a small,
//! fixed method set. A [`Signer`] produces a signature and carries the
//! identity it signs as (algorithm, issuer, key id); a [`Verifier`]
//! checks one such identity's signatures; a [`KeyLocator`] resolves
//! the candidate verifiers for a declared `(issuer, key id)` pair.

mod hmac;
mod locator;
mod rsa;

pub use hmac::{HmacSha256Signer, HmacSha256Verifier};
pub use locator::StaticKeyLocator;
pub use rsa::{RsaSha256Signer, RsaSha256Verifier};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Supported signature algorithm identifiers
///
/// Serializes to the wire names carried in the header's `alg` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    /// HMAC with SHA-256 over a shared secret
    #[serde(rename = "HS256")]
    HmacSha256,

    /// RSA PKCS#1 v1.5 with SHA-256 over an asymmetric key pair
    #[serde(rename = "RS256")]
    RsaSha256,
}

impl SignatureAlgorithm {
    /// The wire name of this algorithm
    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::HmacSha256 => "HS256",
            SignatureAlgorithm::RsaSha256 => "RS256",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Produces signatures over arbitrary bytes
///
/// A signer also declares the identity it signs as; token construction
/// copies the algorithm and key id into the header and the issuer into
/// the `iss` claim.
pub trait Signer: Send + Sync {
    /// The algorithm this signer implements
    fn algorithm(&self) -> SignatureAlgorithm;

    /// Issuer this signer signs as, if any
    fn issuer(&self) -> Option<&str>;

    /// Key identifier published in the token header, if any
    fn key_id(&self) -> Option<&str>;

    /// Sign the given bytes
    ///
    /// Deterministic per algorithm; fails only on unusable key
    /// material, surfaced as [`Error::SigningFailure`].
    ///
    /// [`Error::SigningFailure`]: crate::error::Error::SigningFailure
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Checks signatures for one `(issuer, key id, algorithm)` identity
pub trait Verifier: Send + Sync {
    /// Verify `signature` over `signing_input`
    ///
    /// Fails with [`Error::SignatureMismatch`] when the signature does
    /// not validate. Implementations use constant-time comparison
    /// where the underlying primitive allows it.
    ///
    /// [`Error::SignatureMismatch`]: crate::error::Error::SignatureMismatch
    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()>;
}

/// Resolves candidate verifiers for a declared token identity
///
/// Verification tries candidates in the returned order and succeeds if
/// any one validates. An empty result is a resolvable-identity
/// failure, surfaced by the parser as [`Error::UnknownKey`] before any
/// cryptographic check runs.
///
/// Implementations that perform I/O (remote key fetch) apply their own
/// timeout and retry policy; the parser only sees the resolved
/// sequence.
///
/// [`Error::UnknownKey`]: crate::error::Error::UnknownKey
pub trait KeyLocator: Send + Sync {
    /// Candidate verifiers for the given issuer and key id
    fn resolve(&self, issuer: Option<&str>, key_id: Option<&str>) -> Vec<Arc<dyn Verifier>>;
}
