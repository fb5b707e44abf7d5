//! Token management commands.
//!
//! `quire token issue` - Issue a new signed token.
//! `quire token session` - Issue a login session token for a user.
//! `quire token verify` - Verify a token is valid.
//! `quire token inspect` - Inspect a token's payload without verification.

use anyhow::Context;
use chrono::Utc;
use quire_core::{QuireConfig, SecretConfig, parse_duration};
use quire_jwt::{Claims, JwtService, SessionIssuer, SigningKey, inspect_unverified};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the signing secret.
///
/// Sources, in order:
/// - `key`: a path to a file containing a hex-encoded secret, or the hex secret itself
/// - the `secret` section of the loaded configuration
/// - the default secret sources (the QUIRE_SECRET env var)
fn resolve_secret(key: Option<String>, config: Option<&QuireConfig>) -> anyhow::Result<Vec<u8>> {
    if let Some(key_str) = key {
        // If it looks like a file path and the file exists, load from file
        let path = Path::new(&key_str);
        let hex = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read secret from file: {}", path.display()))?
        } else {
            key_str
        };

        let secret = SigningKey::from_hex(&hex)
            .context("Failed to parse secret. Expected a hex-encoded key")?;
        anyhow::ensure!(!secret.is_empty(), "Secret is empty");
        return Ok(secret.as_bytes().to_vec());
    }

    let default_secret = SecretConfig::default();
    let secret_config = config.map_or(&default_secret, |c| &c.secret);

    secret_config.resolve_secret()?.context(
        "Secret not provided. Either pass --key <path|hex>, --config <file> or set QUIRE_SECRET",
    )
}

/// Read a token from a file if `token` names one, otherwise use it verbatim.
fn read_token(token: String) -> anyhow::Result<String> {
    if Path::new(&token).exists() {
        Ok(fs::read_to_string(&token)?.trim().to_string())
    } else {
        Ok(token)
    }
}

/// Parse a JSON object of claims.
fn parse_claims(json: &str) -> anyhow::Result<Claims> {
    let value: Value = serde_json::from_str(json).context("Claims must be valid JSON")?;
    match value {
        Value::Object(claims) => Ok(claims),
        _ => anyhow::bail!("Claims must be a JSON object"),
    }
}

/// Issue a new token.
pub fn issue(
    key: Option<String>,
    config: Option<&QuireConfig>,
    claims: Option<String>,
    subject: Option<String>,
    expires: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let service = JwtService::with_secret(&resolve_secret(key, config)?);

    let mut claims = match claims {
        Some(json) => parse_claims(&json)?,
        None => Claims::new(),
    };
    if let Some(sub) = &subject {
        claims.insert("sub".to_string(), Value::from(sub.as_str()));
    }
    let expires_at = match &expires {
        Some(e) => {
            let expires_at = Utc::now() + parse_duration(e)?;
            claims.insert("exp".to_string(), Value::from(expires_at.timestamp()));
            Some(expires_at)
        }
        None => None,
    };

    let token = service.issue(&claims)?;

    // Output the token
    if let Some(output_path) = output {
        fs::write(&output_path, &token)?;
        println!("✔ Token written to: {}", output_path.display());
        if let Some(sub) = &subject {
            println!("  Subject: {}", sub);
        }
        if let Some(at) = expires_at {
            println!("  Expires: {}", at.to_rfc3339());
        }
    } else {
        println!("{}", token);
    }

    Ok(())
}

/// Verify a token. Returns whether it is valid.
///
/// The reason for a rejection is deliberately not reported.
pub fn verify(
    key: Option<String>,
    config: Option<&QuireConfig>,
    token: String,
) -> anyhow::Result<bool> {
    let service = JwtService::with_secret(&resolve_secret(key, config)?);
    let token = read_token(token)?;

    if service.verify(&token) {
        println!("✔ Token is valid");
        Ok(true)
    } else {
        println!("✖ Token is not valid");
        Ok(false)
    }
}

/// Issue a login session token for `user`, using the configured lifetime.
pub fn session(
    key: Option<String>,
    config: Option<&QuireConfig>,
    user: String,
) -> anyhow::Result<()> {
    let service = JwtService::with_secret(&resolve_secret(key, config)?);

    let session_config = config.map(|c| c.session.clone()).unwrap_or_default();
    let sessions = SessionIssuer::new(&service, session_config.lifetime()?)
        .with_user_claim(session_config.user_claim);

    let (token, expires_at) = sessions.issue(&user)?;
    println!("{}", token);
    tracing::info!(user = %user, expires_at = %expires_at.to_rfc3339(), "session token issued");

    Ok(())
}

/// Inspect a token without verification.
pub fn inspect(token: String) -> anyhow::Result<()> {
    let token = read_token(token)?;
    let claims = inspect_unverified(&token).context("Token is malformed")?;

    println!("⚠️  Payload shown WITHOUT signature verification:");
    println!();
    println!("{}", serde_json::to_string_pretty(&claims)?);

    Ok(())
}
