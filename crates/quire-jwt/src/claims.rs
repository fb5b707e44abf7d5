//! Token claims and temporal validation.

use crate::error::JwtError;
use serde_json::{Map, Value};

/// A token payload: claim name to arbitrary JSON value.
///
/// Member order is not preserved across a round trip.
pub type Claims = Map<String, Value>;

/// The seven IANA registered claim names.
pub const REGISTERED_CLAIMS: [&str; 7] = ["iss", "sub", "aud", "exp", "nbf", "iat", "jti"];

/// Copy `claims`, adding an explicit `null` for every absent registered claim.
///
/// This is a legacy wire-compatibility quirk, not something RFC 7519 asks
/// for: existing consumers read their own token payloads and expect every
/// registered name to be present. The caller's map is never touched.
pub fn with_registered_nulls(claims: &Claims) -> Claims {
    let mut padded = claims.clone();
    for name in REGISTERED_CLAIMS {
        padded.entry(name).or_insert(Value::Null);
    }
    padded
}

/// Check `exp` and `nbf` against `now` (seconds since the Unix epoch).
///
/// A claim that is absent or `null` is not checked. Any other non-numeric
/// value fails.
pub fn validate_time(claims: &Claims, now: i64) -> Result<(), JwtError> {
    let now = now as f64;

    if let Some(exp) = numeric_claim(claims, "exp")? {
        if exp <= now {
            return Err(JwtError::Expired { exp });
        }
    }

    if let Some(nbf) = numeric_claim(claims, "nbf")? {
        if nbf > now {
            return Err(JwtError::NotYetValid { nbf });
        }
    }

    Ok(())
}

fn numeric_claim(claims: &Claims, name: &str) -> Result<Option<f64>, JwtError> {
    match claims.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| JwtError::MalformedToken(format!("`{name}` is not representable"))),
        Some(_) => Err(JwtError::MalformedToken(format!("`{name}` is not a number"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Claims {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_registered_nulls_added_on_copy() {
        let original = claims(json!({"sub": "alice", "admin": true}));
        let padded = with_registered_nulls(&original);

        assert_eq!(original.len(), 2);
        assert_eq!(padded.len(), 8);
        assert_eq!(padded["sub"], json!("alice"));
        assert_eq!(padded["exp"], Value::Null);
        assert_eq!(padded["jti"], Value::Null);
    }

    #[test]
    fn test_validate_time_without_temporal_claims() {
        assert!(validate_time(&Claims::new(), 1_000).is_ok());
        assert!(validate_time(&with_registered_nulls(&Claims::new()), 1_000).is_ok());
    }

    #[test]
    fn test_exp_boundary() {
        let c = claims(json!({"exp": 1000}));
        assert!(validate_time(&c, 999).is_ok());
        assert!(matches!(validate_time(&c, 1000), Err(JwtError::Expired { .. })));
        assert!(matches!(validate_time(&c, 1001), Err(JwtError::Expired { .. })));
    }

    #[test]
    fn test_nbf_boundary() {
        let c = claims(json!({"nbf": 1000}));
        assert!(matches!(validate_time(&c, 999), Err(JwtError::NotYetValid { .. })));
        assert!(validate_time(&c, 1000).is_ok());
        assert!(validate_time(&c, 1001).is_ok());
    }

    #[test]
    fn test_fractional_exp() {
        let c = claims(json!({"exp": 1000.5}));
        assert!(validate_time(&c, 1000).is_ok());
        assert!(validate_time(&c, 1001).is_err());
    }

    #[test]
    fn test_non_numeric_temporal_claims_rejected() {
        let c = claims(json!({"exp": "9999999999"}));
        assert!(matches!(validate_time(&c, 0), Err(JwtError::MalformedToken(_))));

        let c = claims(json!({"nbf": true}));
        assert!(matches!(validate_time(&c, 0), Err(JwtError::MalformedToken(_))));
    }
}
