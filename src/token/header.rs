use crate::crypto::SignatureAlgorithm;
use serde::{Deserialize, Serialize};

/// Type tag written into headers of tokens created by this crate
pub const TOKEN_TYPE: &str = "JWT";

/// Token header: algorithm and key metadata
///
/// Immutable once a token is constructed for signing; derived from the
/// signer that created it. Unknown header fields are tolerated on
/// parse and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Signature algorithm identifier
    #[serde(rename = "alg")]
    pub algorithm: SignatureAlgorithm,

    /// Key identifier, opaque to this crate
    #[serde(rename = "kid", skip_serializing_if = "Option::is_none", default)]
    pub key_id: Option<String>,

    /// Format type tag, `"JWT"` on created tokens
    #[serde(rename = "typ", skip_serializing_if = "Option::is_none", default)]
    pub token_type: Option<String>,
}

impl Header {
    /// Key id if present
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }
}
