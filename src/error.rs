//! Errors for token creation, parsing, and verification

use thiserror::Error;

/// Errors that can occur while creating, parsing, or verifying a token
///
/// Every verification failure is terminal for that call: the parser
/// performs no partial trust and never downgrades or swallows a failed
/// check. Callers decide user-visible behavior from the variant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Structural Errors
    // ============================================================================
    #[error("invalid token format: expected three non-empty segments separated by '.'")]
    FormatInvalid,

    #[error("malformed token segment: {0}")]
    MalformedPayload(String),

    // ============================================================================
    // Key Resolution and Signature Errors
    // ============================================================================
    #[error("no verifier found for issuer {issuer:?} and key id {key_id:?}")]
    UnknownKey {
        issuer: Option<String>,
        key_id: Option<String>,
    },

    #[error("signature verification failed")]
    SignatureMismatch,

    // ============================================================================
    // Validity Window Errors
    // ============================================================================
    #[error("token issued at {issued_at}, after its expiration at {expiration}")]
    IssuedAfterExpiration { issued_at: i64, expiration: i64 },

    #[error("token issued in the future at {issued_at} (now: {now}, skew: {skew}s)")]
    IssuedInFuture { issued_at: i64, now: i64, skew: u64 },

    #[error("token expired at {expiration} (now: {now}, skew: {skew}s)")]
    Expired { expiration: i64, now: i64, skew: u64 },

    // ============================================================================
    // Policy and Access Errors
    // ============================================================================
    #[error("token audience {audience:?} was rejected")]
    AudienceRejected { audience: Option<String> },

    #[error("claim '{claim}' is not of type {expected}")]
    TypeMismatch {
        claim: String,
        expected: &'static str,
    },

    // ============================================================================
    // Signing Errors
    // ============================================================================
    #[error("signing failed: {0}")]
    SigningFailure(String),
}

/// Result type alias for jsontoken operations
pub type Result<T> = std::result::Result<T, Error>;
