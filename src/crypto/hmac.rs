//! HMAC-SHA256 signer and verifier

use crate::crypto::{SignatureAlgorithm, Signer, Verifier};
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn compute_mac(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| Error::SigningFailure(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Signer keyed by a shared secret
pub struct HmacSha256Signer {
    issuer: Option<String>,
    key_id: Option<String>,
    key: Vec<u8>,
}

impl HmacSha256Signer {
    /// Create a signer for the given issuer and key id
    ///
    /// Either identity part may be absent; the token header and `iss`
    /// claim then omit the corresponding field.
    pub fn new(issuer: Option<String>, key_id: Option<String>, key: &[u8]) -> Self {
        Self {
            issuer,
            key_id,
            key: key.to_vec(),
        }
    }
}

impl Signer for HmacSha256Signer {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::HmacSha256
    }

    fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        compute_mac(&self.key, data)
    }
}

/// Verifier keyed by the same shared secret as the signer
pub struct HmacSha256Verifier {
    key: Vec<u8>,
}

impl HmacSha256Verifier {
    /// Create a verifier over the shared secret
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }
}

impl Verifier for HmacSha256Verifier {
    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()> {
        let expected = compute_mac(&self.key, signing_input)?;

        if signature.len() != expected.len() {
            return Err(Error::SignatureMismatch);
        }

        if constant_time_eq(signature, &expected) {
            Ok(())
        } else {
            Err(Error::SignatureMismatch)
        }
    }
}
