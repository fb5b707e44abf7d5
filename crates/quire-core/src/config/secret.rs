//! Signing secret configuration.

use super::ConfigError;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted for the signing secret by default.
pub const DEFAULT_SECRET_ENV: &str = "QUIRE_SECRET";

/// How a configured secret string maps to key bytes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    /// The UTF-8 bytes of the string are the key.
    #[default]
    Raw,
    /// Hex-encoded key bytes.
    Hex,
    /// Standard base64-encoded key bytes.
    Base64,
}

/// Where the token signing secret comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretConfig {
    /// Environment variable containing the secret.
    #[serde(default = "default_secret_env")]
    pub secret_env: Option<String>,

    /// Path to a file containing the secret.
    #[serde(default)]
    pub secret_file: Option<PathBuf>,

    /// Encoding of the secret in the environment variable or file.
    #[serde(default)]
    pub encoding: SecretEncoding,
}

impl Default for SecretConfig {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
            secret_file: None,
            encoding: SecretEncoding::default(),
        }
    }
}

impl SecretConfig {
    /// Resolve the secret string from environment or file.
    pub fn resolve_secret_string(&self) -> Result<Option<String>, std::io::Error> {
        // Try environment variable first
        if let Some(env_var) = &self.secret_env {
            if let Ok(secret) = std::env::var(env_var) {
                let secret = secret.trim();
                if !secret.is_empty() {
                    return Ok(Some(secret.to_string()));
                }
            }
        }

        // Try file path
        if let Some(path) = &self.secret_file {
            if path.exists() {
                let secret = std::fs::read_to_string(path)?;
                return Ok(Some(secret.trim().to_string()));
            }
        }

        Ok(None)
    }

    /// Resolve and decode the secret into key bytes.
    ///
    /// Returns `Ok(None)` when no source yields a secret.
    pub fn resolve_secret(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        let Some(secret) = self.resolve_secret_string()? else {
            return Ok(None);
        };
        self.decode(&secret).map(Some)
    }

    /// Decode a secret string according to [`SecretConfig::encoding`].
    pub fn decode(&self, secret: &str) -> Result<Vec<u8>, ConfigError> {
        let bytes = match self.encoding {
            SecretEncoding::Raw => secret.as_bytes().to_vec(),
            SecretEncoding::Hex => hex::decode(secret)
                .map_err(|e| ConfigError::Config(format!("secret is not valid hex: {e}")))?,
            SecretEncoding::Base64 => STANDARD
                .decode(secret)
                .map_err(|e| ConfigError::Config(format!("secret is not valid base64: {e}")))?,
        };

        if bytes.is_empty() {
            return Err(ConfigError::Config("secret is empty".to_string()));
        }
        Ok(bytes)
    }
}

fn default_secret_env() -> Option<String> {
    Some(DEFAULT_SECRET_ENV.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_config(contents: &str, encoding: SecretEncoding) -> (NamedTempFile, SecretConfig) {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{contents}").unwrap();
        let config = SecretConfig {
            secret_env: None,
            secret_file: Some(file.path().to_path_buf()),
            encoding,
        };
        (file, config)
    }

    #[test]
    fn test_resolve_from_file_trims() {
        let (_file, config) = file_config("  s3cret  ", SecretEncoding::Raw);
        assert_eq!(config.resolve_secret().unwrap(), Some(b"s3cret".to_vec()));
    }

    #[test]
    fn test_resolve_hex() {
        let (_file, config) = file_config("736563726574", SecretEncoding::Hex);
        assert_eq!(config.resolve_secret().unwrap(), Some(b"secret".to_vec()));
    }

    #[test]
    fn test_resolve_base64() {
        let (_file, config) = file_config("c2VjcmV0", SecretEncoding::Base64);
        assert_eq!(config.resolve_secret().unwrap(), Some(b"secret".to_vec()));
    }

    #[test]
    fn test_invalid_hex_is_an_error() {
        let (_file, config) = file_config("not-hex", SecretEncoding::Hex);
        assert!(matches!(config.resolve_secret(), Err(ConfigError::Config(_))));
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let (_file, config) = file_config("   ", SecretEncoding::Raw);
        assert!(matches!(config.resolve_secret(), Err(ConfigError::Config(_))));
    }

    #[test]
    fn test_missing_sources_resolve_to_none() {
        let config = SecretConfig {
            secret_env: Some("QUIRE_TEST_SECRET_THAT_IS_NEVER_SET".to_string()),
            secret_file: Some(PathBuf::from("/nonexistent/quire/secret")),
            encoding: SecretEncoding::Raw,
        };
        assert_eq!(config.resolve_secret().unwrap(), None);
    }

    #[test]
    fn test_default_reads_quire_secret() {
        let config = SecretConfig::default();
        assert_eq!(config.secret_env.as_deref(), Some(DEFAULT_SECRET_ENV));
        assert_eq!(config.encoding, SecretEncoding::Raw);
    }
}
