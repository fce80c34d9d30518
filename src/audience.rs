//! Audience acceptance policy

use crate::error::{Error, Result};

/// Decides whether a token's declared audience is acceptable to the
/// verifying party
pub trait AudienceChecker: Send + Sync {
    /// Check the declared audience, `None` when the token carries no
    /// `aud` claim
    ///
    /// Declining fails with [`Error::AudienceRejected`].
    fn check(&self, audience: Option<&str>) -> Result<()>;
}

/// Permissive policy that accepts any audience, including none
pub struct IgnoreAudience;

impl AudienceChecker for IgnoreAudience {
    fn check(&self, _audience: Option<&str>) -> Result<()> {
        Ok(())
    }
}

/// Accepts exactly one audience string
///
/// A token without an `aud` claim is rejected.
pub struct StaticAudience {
    expected: String,
}

impl StaticAudience {
    /// Create a checker that accepts only `expected`
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl AudienceChecker for StaticAudience {
    fn check(&self, audience: Option<&str>) -> Result<()> {
        match audience {
            Some(aud) if aud == self.expected => Ok(()),
            _ => Err(Error::AudienceRejected {
                audience: audience.map(str::to_string),
            }),
        }
    }
}
