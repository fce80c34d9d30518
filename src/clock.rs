//! Time sources and the validity-window check
//!
//! Both the signing path ([`Token::serialize_and_sign`]) and the
//! verification path ([`TokenParser::verify_and_deserialize`]) call the
//! single [`check_validity_window`] function. Keeping one definition
//! prevents the creation-time and verification-time semantics from
//! drifting apart.
//!
//! [`Token::serialize_and_sign`]: crate::token::Token::serialize_and_sign
//! [`TokenParser::verify_and_deserialize`]: crate::parser::TokenParser::verify_and_deserialize

use crate::error::{Error, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default clock-skew tolerance in seconds
pub const DEFAULT_SKEW_SECONDS: u64 = 60;

/// A source of the current time plus an acceptable clock-skew tolerance
///
/// Implementations are shared read-only across concurrent calls.
pub trait Clock: Send + Sync {
    /// Current time as seconds since the Unix epoch
    fn now(&self) -> i64;

    /// Allowed disagreement, in seconds, between the issuer's clock and
    /// this clock when checking time bounds
    fn skew_tolerance(&self) -> u64;
}

/// Clock backed by the system time
#[derive(Debug, Clone)]
pub struct SystemClock {
    skew_seconds: u64,
}

impl SystemClock {
    /// Create a system clock with the given skew tolerance in seconds
    pub fn new(skew_seconds: u64) -> Self {
        Self { skew_seconds }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(DEFAULT_SKEW_SECONDS)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_else(|_| std::time::Duration::from_secs(0))
            .as_secs() as i64
    }

    fn skew_tolerance(&self) -> u64 {
        self.skew_seconds
    }
}

/// Clock that always reports a fixed instant
///
/// Intended for tests that need reproducible validity-window behavior.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: i64,
    skew_seconds: u64,
}

impl FixedClock {
    /// Create a fixed clock reporting `now` (epoch seconds) with the
    /// given skew tolerance
    pub fn new(now: i64, skew_seconds: u64) -> Self {
        Self { now, skew_seconds }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.now
    }

    fn skew_tolerance(&self) -> u64 {
        self.skew_seconds
    }
}

/// Check a token's validity window against a point in time
///
/// An unset bound disables that side's check, so a token may be
/// open-ended on either side. Checks run in a fixed order:
///
/// 1. `issued_at > expiration` (both present) fails with
///    [`Error::IssuedAfterExpiration`]
/// 2. `issued_at > now + skew` fails with [`Error::IssuedInFuture`]
/// 3. `expiration < now - skew` fails with [`Error::Expired`]
pub fn check_validity_window(
    issued_at: Option<i64>,
    expiration: Option<i64>,
    now: i64,
    skew_seconds: u64,
) -> Result<()> {
    let skew = skew_seconds as i64;

    if let (Some(iat), Some(exp)) = (issued_at, expiration) {
        if iat > exp {
            return Err(Error::IssuedAfterExpiration {
                issued_at: iat,
                expiration: exp,
            });
        }
    }

    if let Some(iat) = issued_at {
        if iat > now + skew {
            return Err(Error::IssuedInFuture {
                issued_at: iat,
                now,
                skew: skew_seconds,
            });
        }
    }

    if let Some(exp) = expiration {
        if exp < now - skew {
            return Err(Error::Expired {
                expiration: exp,
                now,
                skew: skew_seconds,
            });
        }
    }

    Ok(())
}
