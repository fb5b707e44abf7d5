//! Login session configuration.

use super::ConfigError;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Settings for login session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session token lifetime (e.g., "7d", "24h", "30m").
    #[serde(default = "default_lifetime")]
    pub lifetime: String,

    /// Claim carrying the user identifier.
    #[serde(default = "default_user_claim")]
    pub user_claim: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lifetime: default_lifetime(),
            user_claim: default_user_claim(),
        }
    }
}

impl SessionConfig {
    /// Parsed session lifetime.
    pub fn lifetime(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.lifetime)
    }
}

/// Parse a duration string like "24h", "7d", "30m" or "60s".
///
/// A bare number is read as hours.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim().to_lowercase();
    let invalid = || ConfigError::Config(format!("invalid duration: {s:?}"));

    let (digits, unit): (&str, fn(i64) -> Option<Duration>) =
        if let Some(d) = s.strip_suffix('d') {
            (d, Duration::try_days)
        } else if let Some(h) = s.strip_suffix('h') {
            (h, Duration::try_hours)
        } else if let Some(m) = s.strip_suffix('m') {
            (m, Duration::try_minutes)
        } else if let Some(sec) = s.strip_suffix('s') {
            (sec, Duration::try_seconds)
        } else {
            (s.as_str(), Duration::try_hours)
        };

    let n: i64 = digits.trim().parse().map_err(|_| invalid())?;
    if n <= 0 {
        return Err(invalid());
    }
    unit(n).ok_or_else(invalid)
}

fn default_lifetime() -> String {
    "7d".to_string()
}

fn default_user_claim() -> String {
    "user".to_string()
}
