// Configuration types shared across all Quire crates
pub mod config;

pub use config::{
    ConfigError, DEFAULT_SECRET_ENV, LoggingConfig, QuireConfig, SecretConfig, SecretEncoding,
    SessionConfig, parse_duration,
};
