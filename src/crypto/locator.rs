//! In-memory key locator

use crate::crypto::{KeyLocator, Verifier};
use std::collections::HashMap;
use std::sync::Arc;

/// Key locator backed by a static `(issuer, key id)` table
///
/// Registration and lookup both key on the issuer and key id a token
/// declares. A lookup for `(issuer, Some(kid))` that has no exact
/// entry falls back to verifiers registered issuer-wide under
/// `(issuer, None)`, which covers issuers that rotate keys without
/// publishing key ids.
#[derive(Default)]
pub struct StaticKeyLocator {
    verifiers: HashMap<(Option<String>, Option<String>), Vec<Arc<dyn Verifier>>>,
}

impl StaticKeyLocator {
    /// Create an empty locator
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a verifier for the given issuer and key id
    ///
    /// Multiple verifiers may be registered under the same pair; they
    /// are tried in registration order.
    pub fn add(
        &mut self,
        issuer: Option<&str>,
        key_id: Option<&str>,
        verifier: Arc<dyn Verifier>,
    ) {
        self.verifiers
            .entry((issuer.map(str::to_string), key_id.map(str::to_string)))
            .or_default()
            .push(verifier);
    }
}

impl KeyLocator for StaticKeyLocator {
    fn resolve(&self, issuer: Option<&str>, key_id: Option<&str>) -> Vec<Arc<dyn Verifier>> {
        let exact = (issuer.map(str::to_string), key_id.map(str::to_string));
        if let Some(found) = self.verifiers.get(&exact) {
            return found.clone();
        }

        if key_id.is_some() {
            let issuer_wide = (issuer.map(str::to_string), None);
            if let Some(found) = self.verifiers.get(&issuer_wide) {
                return found.clone();
            }
        }

        Vec::new()
    }
}
