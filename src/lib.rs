//! # jsontoken - Compact Signed JSON Tokens
//!
//! > Create and verify compact, signed, self-describing tokens.
//!
//! A token is three `.`-separated Base64URL segments: a JSON header
//! carrying the algorithm and key metadata, a JSON claim set (issuer,
//! audience, validity window, application data), and a signature
//! binding the two. A party can assert claims that another party
//! verifies without contacting the issuer, subject to cryptographic
//! proof and time validity.
//!
//! ## Creating a token
//!
//! ```ignore
//! use jsontoken::*;
//! use std::sync::Arc;
//!
//! let signer = Arc::new(HmacSha256Signer::new(
//!     Some("google.com".into()),
//!     Some("key2".into()),
//!     b"shared-secret",
//! ));
//! let clock = Arc::new(SystemClock::default());
//!
//! let mut token = Token::new(signer, clock.clone());
//! token.set_audience("http://www.google.com");
//! token.set_issued_at(now);
//! token.set_expiration(now + 3600);
//! token.set_param("bar", 15);
//!
//! let wire = token.serialize_and_sign()?;
//! ```
//!
//! ## Verifying a token
//!
//! ```ignore
//! let mut locator = StaticKeyLocator::new();
//! locator.add(
//!     Some("google.com"),
//!     Some("key2"),
//!     Arc::new(HmacSha256Verifier::new(b"shared-secret")),
//! );
//!
//! let parser = TokenParser::new(clock, Arc::new(locator), Arc::new(IgnoreAudience));
//! let token = parser.verify_and_deserialize(&wire)?;
//! assert_eq!(token.param_as_i64("bar")?, Some(15));
//! ```
//!
//! `TokenParser::deserialize` decodes the same wire string without any
//! cryptographic check, for callers that need to inspect a token
//! before deciding how to verify it.
//!
//! ## Verification chain
//!
//! `verify_and_deserialize` runs four mandatory checks in order and
//! short-circuits on the first failure:
//!
//! ```text
//! wire string
//!     │ structural decode (three non-empty segments, Base64URL, JSON)
//!     ▼
//! key resolution (KeyLocator; UnknownKey if no verifier resolves)
//!     │
//!     ▼
//! signature verification (literal wire segments, candidates in order)
//!     │
//!     ▼
//! validity window (clock-skew tolerant; same function as sign time)
//!     │
//!     ▼
//! audience check (AudienceChecker policy)
//! ```
//!
//! The validity-window check is one shared function invoked at both
//! sign time and verify time, so creation-time and verification-time
//! semantics cannot drift apart.
//!
//! ## Algorithms
//!
//! - **HS256**: [`HmacSha256Signer`] / [`HmacSha256Verifier`], keyed
//!   by a shared secret; verification compares in constant time.
//! - **RS256**: [`RsaSha256Signer`] / [`RsaSha256Verifier`], keyed by
//!   an RSA key pair (PKCS#8 private key, RSAPublicKey DER).
//!
//! Token code is algorithm-agnostic: anything implementing [`Signer`]
//! can create tokens and anything implementing [`Verifier`] can check
//! them, with [`KeyLocator`] mapping a declared `(issuer, key id)`
//! identity to its verifiers.

// Core modules
pub mod error;
pub mod utils;

// Time and validity window
pub mod clock;

// Signature algorithms and key resolution
pub mod crypto;

// Claims and audience policy
pub mod audience;
pub mod claims;

// Token data model and parser
pub mod parser;
pub mod token;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use audience::{AudienceChecker, IgnoreAudience, StaticAudience};
pub use claims::ClaimSet;
pub use clock::{check_validity_window, Clock, FixedClock, SystemClock, DEFAULT_SKEW_SECONDS};
pub use crypto::{
    HmacSha256Signer, HmacSha256Verifier, KeyLocator, RsaSha256Signer, RsaSha256Verifier,
    SignatureAlgorithm, Signer, StaticKeyLocator, Verifier,
};
pub use error::{Error, Result};
pub use parser::TokenParser;
pub use token::{Header, Token};
