//! Configuration types for Quire.
//!
//! Configuration is loaded from a single YAML file (quire.yaml) into a
//! `QuireConfig` structure. Every section is optional and falls back to its
//! defaults.
//!
//! # Example
//!
//! ```yaml
//! secret:
//!   secret_env: QUIRE_SECRET
//!   secret_file: /etc/quire/secret
//!   encoding: hex
//! session:
//!   lifetime: 7d
//! logging:
//!   level: debug
//! ```

pub mod secret;
pub mod session;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use secret::{DEFAULT_SECRET_ENV, SecretConfig, SecretEncoding};
pub use session::{SessionConfig, parse_duration};

/// Complete Quire configuration loaded from a file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuireConfig {
    /// Project name.
    #[serde(default)]
    pub project: Option<String>,

    /// Token signing secret.
    #[serde(default)]
    pub secret: SecretConfig,

    /// Login session tokens.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuireConfig {
    /// Load configuration from a YAML file.
    ///
    /// A relative `secret.secret_file` is resolved against the directory of
    /// the configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;

        let base_dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        if let Some(secret_file) = &config.secret.secret_file {
            if secret_file.is_relative() {
                config.secret.secret_file = Some(base_dir.join(secret_file));
            }
        }

        Ok(config)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = QuireConfig::from_yaml("{}").unwrap();
        assert_eq!(config.secret.secret_env.as_deref(), Some("QUIRE_SECRET"));
        assert_eq!(config.session.lifetime, "7d");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_yaml() {
        let config = QuireConfig::from_yaml(
            r#"
project: blog
secret:
  secret_env: BLOG_SECRET
  secret_file: secret.hex
  encoding: hex
session:
  lifetime: 24h
  user_claim: email
logging:
  level: debug
"#,
        )
        .unwrap();

        assert_eq!(config.project.as_deref(), Some("blog"));
        assert_eq!(config.secret.secret_env.as_deref(), Some("BLOG_SECRET"));
        assert_eq!(config.secret.encoding, SecretEncoding::Hex);
        assert_eq!(config.session.lifetime().unwrap(), chrono::Duration::hours(24));
        assert_eq!(config.session.user_claim, "email");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unknown_encoding_is_rejected() {
        let result = QuireConfig::from_yaml("secret:\n  encoding: rot13\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_from_file_resolves_relative_secret_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("secret.txt"), "s3cret\n").unwrap();
        fs::write(
            dir.path().join("quire.yaml"),
            "secret:\n  secret_env: null\n  secret_file: secret.txt\n",
        )
        .unwrap();

        let config = QuireConfig::from_file(dir.path().join("quire.yaml")).unwrap();
        assert_eq!(
            config.secret.secret_file.as_deref(),
            Some(dir.path().join("secret.txt").as_path())
        );
        assert_eq!(config.secret.resolve_secret().unwrap(), Some(b"s3cret".to_vec()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = QuireConfig::from_file(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
