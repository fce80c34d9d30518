//! RSA-SHA256 signer and verifier
//!
//! Signing uses PKCS#1 v1.5 over a PKCS#8 private key; verification
//! takes the RSAPublicKey DER as produced by
//! [`RsaSha256Signer::public_key_der`].

use crate::crypto::{SignatureAlgorithm, Signer, Verifier};
use crate::error::{Error, Result};

use ring::rand::SystemRandom;
use ring::signature::{RsaKeyPair, UnparsedPublicKey, RSA_PKCS1_2048_8192_SHA256, RSA_PKCS1_SHA256};

/// Signer keyed by an RSA private key
pub struct RsaSha256Signer {
    issuer: Option<String>,
    key_id: Option<String>,
    key_pair: RsaKeyPair,
}

impl RsaSha256Signer {
    /// Create a signer from a PKCS#8-encoded RSA private key
    ///
    /// Fails with [`Error::SigningFailure`] when the key material is
    /// rejected (wrong encoding, key too small).
    pub fn from_pkcs8(
        issuer: Option<String>,
        key_id: Option<String>,
        pkcs8_der: &[u8],
    ) -> Result<Self> {
        let key_pair = RsaKeyPair::from_pkcs8(pkcs8_der)
            .map_err(|e| Error::SigningFailure(e.to_string()))?;
        Ok(Self {
            issuer,
            key_id,
            key_pair,
        })
    }

    /// RSAPublicKey DER for the matching [`RsaSha256Verifier`]
    pub fn public_key_der(&self) -> Vec<u8> {
        self.key_pair.public().as_ref().to_vec()
    }
}

impl Signer for RsaSha256Signer {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::RsaSha256
    }

    fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let rng = SystemRandom::new();
        let mut signature = vec![0u8; self.key_pair.public().modulus_len()];
        self.key_pair
            .sign(&RSA_PKCS1_SHA256, &rng, data, &mut signature)
            .map_err(|e| Error::SigningFailure(e.to_string()))?;
        Ok(signature)
    }
}

/// Verifier keyed by an RSA public key
pub struct RsaSha256Verifier {
    public_key_der: Vec<u8>,
}

impl RsaSha256Verifier {
    /// Create a verifier from RSAPublicKey DER bytes
    pub fn new(public_key_der: impl Into<Vec<u8>>) -> Self {
        Self {
            public_key_der: public_key_der.into(),
        }
    }
}

impl Verifier for RsaSha256Verifier {
    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()> {
        let public_key = UnparsedPublicKey::new(&RSA_PKCS1_2048_8192_SHA256, &self.public_key_der);
        public_key
            .verify(signing_input, signature)
            .map_err(|_| Error::SignatureMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_signer() -> RsaSha256Signer {
        use rsa::pkcs8::EncodePrivateKey;
        use rsa::RsaPrivateKey;

        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate key");
        let pkcs8 = private_key
            .to_pkcs8_der()
            .expect("failed to serialize to PKCS#8");

        RsaSha256Signer::from_pkcs8(
            Some("google.com".into()),
            Some("key1".into()),
            pkcs8.as_bytes(),
        )
        .expect("failed to build signer")
    }

    #[test]
    fn sign_then_verify() {
        let signer = generate_signer();
        let signature = signer.sign(b"header.payload").unwrap();

        let verifier = RsaSha256Verifier::new(signer.public_key_der());
        assert!(verifier.verify(b"header.payload", &signature).is_ok());
    }

    #[test]
    fn tampered_input_fails() {
        let signer = generate_signer();
        let signature = signer.sign(b"header.payload").unwrap();

        let verifier = RsaSha256Verifier::new(signer.public_key_der());
        let result = verifier.verify(b"header.Payload", &signature);
        assert!(matches!(result, Err(Error::SignatureMismatch)));
    }

    #[test]
    fn wrong_key_fails() {
        let signer = generate_signer();
        let other = generate_signer();
        let signature = signer.sign(b"header.payload").unwrap();

        let verifier = RsaSha256Verifier::new(other.public_key_der());
        let result = verifier.verify(b"header.payload", &signature);
        assert!(matches!(result, Err(Error::SignatureMismatch)));
    }

    #[test]
    fn rejects_garbage_key_material() {
        let result = RsaSha256Signer::from_pkcs8(None, None, &[1, 2, 3]);
        assert!(matches!(result, Err(Error::SigningFailure(_))));
    }

    #[test]
    fn signer_identity() {
        let signer = generate_signer();
        assert_eq!(signer.algorithm(), SignatureAlgorithm::RsaSha256);
        assert_eq!(signer.issuer(), Some("google.com"));
        assert_eq!(signer.key_id(), Some("key1"));
    }
}
