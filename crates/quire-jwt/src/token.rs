//! Token issuing, parsing and verification.

use crate::claims::{Claims, validate_time, with_registered_nulls};
use crate::codec;
use crate::error::JwtError;
use crate::keys::{KeyStore, SigningKey};
use crate::signer::{self, TAG_LEN};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// The only accepted signing algorithm.
pub const ALGORITHM: &str = "HS256";

/// The only accepted token type.
pub const TOKEN_TYPE: &str = "JWT";

/// JOSE header. Field order is the serialized order: `{"typ":"JWT","alg":"HS256"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Header {
    typ: String,
    alg: String,
}

impl Header {
    fn hs256() -> Self {
        Self {
            typ: TOKEN_TYPE.to_string(),
            alg: ALGORITHM.to_string(),
        }
    }
}

/// A structurally valid token whose signature has not been checked.
struct ParsedToken<'a> {
    /// `header_b64 "." payload_b64` exactly as received.
    signing_input: &'a str,
    header_json: Vec<u8>,
    claims: Claims,
    tag: Vec<u8>,
}

impl<'a> ParsedToken<'a> {
    fn parse(token: &'a str) -> Result<Self, JwtError> {
        let (signing_input, signature) = token
            .rsplit_once('.')
            .ok_or_else(|| JwtError::MalformedToken("expected three segments".to_string()))?;
        let (header, payload) = signing_input
            .split_once('.')
            .ok_or_else(|| JwtError::MalformedToken("expected three segments".to_string()))?;

        if payload.contains('.') {
            return Err(JwtError::MalformedToken("expected three segments".to_string()));
        }
        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(JwtError::MalformedToken("empty segment".to_string()));
        }

        let header_json = codec::decode(header)?;
        serde_json::from_slice::<Claims>(&header_json)
            .map_err(|e| JwtError::MalformedToken(format!("header is not a JSON object: {e}")))?;

        let claims: Claims = serde_json::from_slice(&codec::decode(payload)?)
            .map_err(|e| JwtError::MalformedToken(format!("payload is not a JSON object: {e}")))?;

        let tag = codec::decode(signature)?;
        if tag.len() != TAG_LEN {
            return Err(JwtError::MalformedToken(format!(
                "signature is {} bytes, expected {TAG_LEN}",
                tag.len()
            )));
        }

        Ok(Self {
            signing_input,
            header_json,
            claims,
            tag,
        })
    }

    fn check_header(&self) -> Result<(), JwtError> {
        // Parsed straight from the received bytes so duplicate members fail.
        let header: Header = serde_json::from_slice(&self.header_json)
            .map_err(|e| JwtError::BadHeader(e.to_string()))?;

        if header.alg != ALGORITHM {
            return Err(JwtError::BadHeader(format!("unsupported alg `{}`", header.alg)));
        }
        if header.typ != TOKEN_TYPE {
            return Err(JwtError::BadHeader(format!("unsupported typ `{}`", header.typ)));
        }
        Ok(())
    }

    fn check_signature(&self, key: &SigningKey) -> Result<(), JwtError> {
        let expected = signer::sign(key.as_bytes(), self.signing_input.as_bytes());
        if signer::tags_equal(&expected, &self.tag) {
            Ok(())
        } else {
            Err(JwtError::BadSignature)
        }
    }
}

/// HS256 token service backed by its own [`KeyStore`].
///
/// All methods take `&self` and are safe to call from any number of threads.
#[derive(Debug, Default)]
pub struct JwtService {
    keys: KeyStore,
}

impl JwtService {
    /// Create a service with no key installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service armed with `secret`.
    pub fn with_secret(secret: &[u8]) -> Self {
        Self {
            keys: KeyStore::with_secret(secret),
        }
    }

    /// Install the signing key. An empty secret disarms the service.
    pub fn configure(&self, secret: &[u8]) {
        self.keys.configure(secret);
    }

    /// Whether a non-empty key is installed.
    pub fn is_configured(&self) -> bool {
        self.keys.is_armed()
    }

    /// Sign `claims` into a compact token.
    ///
    /// Absent registered claims are written as `null` on a private copy.
    ///
    /// # Errors
    ///
    /// [`JwtError::NotConfigured`] if no key is installed,
    /// [`JwtError::Encoding`] if serialization fails.
    pub fn issue(&self, claims: &Claims) -> Result<String, JwtError> {
        let key = self.keys.snapshot();
        if key.is_empty() {
            return Err(JwtError::NotConfigured);
        }

        let payload = serde_json::to_vec(&with_registered_nulls(claims))?;
        let header = serde_json::to_vec(&Header::hs256())?;

        let signing_input = format!("{}.{}", codec::encode(&header), codec::encode(&payload));
        let tag = signer::sign(key.as_bytes(), signing_input.as_bytes());

        Ok(format!("{signing_input}.{}", codec::encode(&tag)))
    }

    /// Sign any serializable value whose JSON form is an object.
    ///
    /// # Errors
    ///
    /// As [`issue`](Self::issue); also [`JwtError::Encoding`] if `claims`
    /// does not serialize to a JSON object.
    pub fn issue_as<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        match serde_json::to_value(claims)? {
            Value::Object(map) => self.issue(&map),
            other => Err(JwtError::Encoding(format!(
                "claims must serialize to an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Check that `token` was signed by this service and is currently valid.
    ///
    /// Every failure yields `false`; the reason is only logged.
    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// [`verify`](Self::verify) against an explicit clock (seconds since the Unix epoch).
    pub fn verify_at(&self, token: &str, now: i64) -> bool {
        match self.check(token, now) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(reason = err.kind(), "token rejected");
                false
            }
        }
    }

    /// Verify `token` and return its claims, collapsing every failure to `None`.
    pub fn verified_claims(&self, token: &str) -> Option<Claims> {
        match self.check(token, Utc::now().timestamp()) {
            Ok(claims) => Some(claims),
            Err(err) => {
                tracing::debug!(reason = err.kind(), "token rejected");
                None
            }
        }
    }

    fn check(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let key = self.keys.snapshot();
        if key.is_empty() {
            return Err(JwtError::NotConfigured);
        }

        let parsed = ParsedToken::parse(token)?;
        parsed.check_header()?;
        parsed.check_signature(&key)?;
        validate_time(&parsed.claims, now)?;

        Ok(parsed.claims)
    }
}

/// Decode the payload of `token` **without** checking its signature or expiry.
///
/// The result is attacker-controlled. Never use it to make an authorization
/// decision; call [`verify`] first. Malformed input yields `None`.
pub fn inspect_unverified(token: &str) -> Option<Claims> {
    ParsedToken::parse(token).ok().map(|parsed| parsed.claims)
}

/// [`inspect_unverified`], deserialized into `T`.
pub fn inspect_unverified_as<T: DeserializeOwned>(token: &str) -> Option<T> {
    inspect_unverified(token).and_then(|claims| serde_json::from_value(Value::Object(claims)).ok())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

static GLOBAL: LazyLock<JwtService> = LazyLock::new(JwtService::new);

/// The process-wide service used by the free functions below.
pub fn global() -> &'static JwtService {
    &GLOBAL
}

/// Install the process-wide signing key. An empty secret disarms it.
pub fn configure(secret: &[u8]) {
    GLOBAL.configure(secret);
}

/// Sign `claims` with the process-wide key.
///
/// # Errors
///
/// See [`JwtService::issue`].
pub fn issue(claims: &Claims) -> Result<String, JwtError> {
    GLOBAL.issue(claims)
}

/// Verify `token` against the process-wide key and the current time.
pub fn verify(token: &str) -> bool {
    GLOBAL.verify(token)
}
