//! Base64url (RFC 4648 §5) without padding.

use crate::error::JwtError;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Encode bytes as a single unpadded base64url segment.
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode an unpadded base64url segment.
///
/// Padding, whitespace, characters outside the URL-safe alphabet and
/// non-canonical trailing bits are all rejected.
pub fn decode(segment: &str) -> Result<Vec<u8>, JwtError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwtError::MalformedToken(format!("base64url decode failed: {e}")))
}
