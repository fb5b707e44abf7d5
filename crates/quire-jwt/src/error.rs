//! Error types for the JWT crate.

use thiserror::Error;

/// Errors that can occur during token operations.
///
/// Only [`issue`](crate::JwtService::issue) hands these to callers. Verification
/// collapses every variant to `false` and inspection to `None`, so the
/// rejection reason never leaks to whoever presented the token.
#[derive(Debug, Error)]
pub enum JwtError {
    /// No signing key is installed, or the installed key is empty.
    #[error("signing key is not configured")]
    NotConfigured,

    /// Claims could not be serialized to a JSON object.
    #[error("claims encoding failed: {0}")]
    Encoding(String),

    /// Segment count, base64, JSON or tag length check failed.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Header is not exactly `{"typ":"JWT","alg":"HS256"}`.
    #[error("unexpected token header: {0}")]
    BadHeader(String),

    /// HMAC tag does not match the signing input.
    #[error("signature mismatch")]
    BadSignature,

    /// The `exp` claim is at or before the current time.
    #[error("token expired at {exp}")]
    Expired { exp: f64 },

    /// The `nbf` claim is after the current time.
    #[error("token not valid before {nbf}")]
    NotYetValid { nbf: f64 },
}

impl From<serde_json::Error> for JwtError {
    fn from(err: serde_json::Error) -> Self {
        JwtError::Encoding(err.to_string())
    }
}

impl JwtError {
    /// Short category name, used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            JwtError::NotConfigured => "not_configured",
            JwtError::Encoding(_) => "encoding",
            JwtError::MalformedToken(_) => "malformed",
            JwtError::BadHeader(_) => "bad_header",
            JwtError::BadSignature => "bad_signature",
            JwtError::Expired { .. } => "expired",
            JwtError::NotYetValid { .. } => "not_yet_valid",
        }
    }
}
