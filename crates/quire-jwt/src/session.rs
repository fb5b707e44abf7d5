//! Login session tokens.
//!
//! A session token is an ordinary HS256 token carrying the user identifier
//! and an `exp` claim. HTTP callers send it as `Authorization: Bearer <token>`.

use crate::claims::Claims;
use crate::error::JwtError;
use crate::token::JwtService;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Default claim holding the user identifier.
pub const DEFAULT_USER_CLAIM: &str = "user";

/// Default session lifetime: one week.
pub fn default_lifetime() -> Duration {
    Duration::days(7)
}

/// Issues and resolves session tokens against a [`JwtService`].
#[derive(Debug, Clone)]
pub struct SessionIssuer<'a> {
    service: &'a JwtService,
    lifetime: Duration,
    user_claim: String,
}

impl<'a> SessionIssuer<'a> {
    pub fn new(service: &'a JwtService, lifetime: Duration) -> Self {
        Self {
            service,
            lifetime,
            user_claim: DEFAULT_USER_CLAIM.to_string(),
        }
    }

    /// Use a different claim name for the user identifier.
    pub fn with_user_claim(mut self, name: impl Into<String>) -> Self {
        self.user_claim = name.into();
        self
    }

    /// Issue a session token for `user`, returning it with its expiry time.
    ///
    /// # Errors
    ///
    /// Propagates [`JwtService::issue`] errors.
    pub fn issue(&self, user: &str) -> Result<(String, DateTime<Utc>), JwtError> {
        let expires_at = Utc::now() + self.lifetime;

        let mut claims = Claims::new();
        claims.insert("exp".to_string(), Value::from(expires_at.timestamp()));
        claims.insert(self.user_claim.clone(), Value::from(user));

        let token = self.service.issue(&claims)?;
        tracing::debug!(user, expires_at = %expires_at, "session token issued");
        Ok((token, expires_at))
    }

    /// Resolve the user of a session token.
    ///
    /// Returns `None` unless the token verifies and carries a string user claim.
    pub fn user(&self, token: &str) -> Option<String> {
        let claims = self.service.verified_claims(token)?;
        match claims.get(&self.user_claim) {
            Some(Value::String(user)) => Some(user.clone()),
            _ => None,
        }
    }
}

/// Extract the token from an `Authorization` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
