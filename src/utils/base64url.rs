//! Base64URL encoding/decoding per RFC 4648
//!
//! No padding, URL-safe characters. Wire segments are produced and
//! consumed exclusively through this module so that sign and verify
//! paths agree on the exact alphabet.

use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encode bytes to a Base64URL string without padding
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode a Base64URL string to bytes
///
/// Rejects padded input and characters outside the URL-safe alphabet.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::MalformedPayload(format!("invalid base64url: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg");
        assert_eq!(encode(b"fo"), "Zm8");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(b"foob"), "Zm9vYg");
        assert_eq!(encode(b"fooba"), "Zm9vYmE");
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn round_trip() {
        for input in ["", "f", "fo", "foo", "Hello, World!", "{\"iss\":\"a\"}"] {
            let encoded = encode(input);
            assert_eq!(decode(&encoded).unwrap(), input.as_bytes());
        }
    }

    #[test]
    fn url_safe_characters() {
        let encoded = encode([0xfb, 0xff]);
        assert!(encoded.contains('-') || encoded.contains('_'));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(matches!(decode("!!!"), Err(Error::MalformedPayload(_))));
        assert!(matches!(decode("Zg=="), Err(Error::MalformedPayload(_))));
        // 4n+1 length can never be valid base64
        assert!(matches!(decode("jKcuP6BR_"), Err(Error::MalformedPayload(_))));
    }
}
