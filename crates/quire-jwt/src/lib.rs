//! # quire-jwt
//!
//! HS256 JSON Web Tokens for Quire.
//!
//! This crate provides functionality for:
//! - Issuing compact HS256 tokens (RFC 7519 / RFC 7515) from arbitrary claims
//! - Verifying tokens in constant time, collapsing every failure to `false`
//! - Inspecting token payloads without verification (debugging only)
//! - Generating signing secrets and login session tokens
//!
//! ## Token Format
//!
//! | Segment | Contents |
//! |---------|----------|
//! | Header | `{"typ":"JWT","alg":"HS256"}` |
//! | Payload | Claims as a JSON object |
//! | Signature | `HMAC-SHA-256(key, header_b64 "." payload_b64)` |
//!
//! Each segment is base64url without padding; segments are joined with `.`.
//!
//! ## Process-wide vs. owned keys
//!
//! [`configure`], [`issue`] and [`verify`] operate on a process-wide
//! [`JwtService`]. Components that need their own key create a
//! [`JwtService`] directly.

pub mod claims;
pub mod codec;
pub mod error;
pub mod keys;
pub mod secret;
pub mod session;
pub mod signer;
pub mod token;

pub use claims::{Claims, REGISTERED_CLAIMS};
pub use error::JwtError;
pub use keys::{KeyStore, SigningKey};
pub use session::{SessionIssuer, bearer_token};
pub use token::{
    JwtService, configure, global, inspect_unverified, inspect_unverified_as, issue, verify,
};
