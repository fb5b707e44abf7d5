//! End-to-end token scenarios.

use quire_jwt::codec;
use quire_jwt::{Claims, JwtService, inspect_unverified};
use serde_json::{Value, json};

fn claims(value: Value) -> Claims {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[test]
fn round_trip_with_expiry() {
    let service = JwtService::with_secret(b"secret");
    let token = service
        .issue(&claims(json!({"exp": 9999999999u64, "sub": "alice"})))
        .unwrap();

    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(
        codec::decode(parts[0]).unwrap(),
        br#"{"typ":"JWT","alg":"HS256"}"#
    );
    assert!(service.verify(&token));
}

#[test]
fn alg_none_is_rejected() {
    let header = codec::encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = codec::encode(br#"{"sub":"alice","admin":true}"#);
    let token = format!("{header}.{payload}.");

    for key in [&b"secret"[..], &b"k1"[..], &b"x"[..]] {
        assert!(!JwtService::with_secret(key).verify(&token));
    }
    assert!(!JwtService::new().verify(&token));
}

#[test]
fn alg_none_with_valid_hmac_is_rejected() {
    let header = codec::encode(br#"{"typ":"JWT","alg":"none"}"#);
    let payload = codec::encode(b"{}");
    let signing_input = format!("{header}.{payload}");
    let tag = quire_jwt::signer::sign(b"secret", signing_input.as_bytes());
    let token = format!("{signing_input}.{}", codec::encode(&tag));

    assert!(!JwtService::with_secret(b"secret").verify(&token));
}

#[test]
fn expired_token_is_rejected() {
    let service = JwtService::with_secret(b"secret");
    let token = service.issue(&claims(json!({"exp": 1}))).unwrap();
    assert!(!service.verify(&token));
}

#[test]
fn tampered_payload_is_rejected() {
    let service = JwtService::with_secret(b"secret");
    let token = service.issue(&claims(json!({"admin": false}))).unwrap();
    assert!(service.verify(&token));

    let parts: Vec<&str> = token.split('.').collect();
    let forged = format!(
        "{}.{}.{}",
        parts[0],
        codec::encode(br#"{"admin":true}"#),
        parts[2]
    );
    assert!(!service.verify(&forged));
}

#[test]
fn reconfigured_key_invalidates_tokens() {
    let service = JwtService::with_secret(b"k1");
    let token = service.issue(&claims(json!({"sub": "alice"}))).unwrap();
    assert!(service.verify(&token));

    service.configure(b"k2");
    assert!(!service.verify(&token));

    let fresh = service.issue(&claims(json!({"sub": "alice"}))).unwrap();
    assert!(service.verify(&fresh));
}

#[test]
fn malformed_shapes_are_rejected() {
    let service = JwtService::with_secret(b"secret");
    let valid = service.issue(&claims(json!({"sub": "alice"}))).unwrap();
    let padded = format!("{valid}=");

    for input in ["", "a.b", "a.b.c.d", "a..c", "a.b.c=", padded.as_str()] {
        assert!(!service.verify(input), "verified {input:?}");
        assert!(inspect_unverified(input).is_none(), "inspected {input:?}");
    }
}

#[test]
fn whitespace_in_token_is_rejected() {
    let service = JwtService::with_secret(b"secret");
    let token = service.issue(&Claims::new()).unwrap();

    assert!(!service.verify(&format!(" {token}")));
    assert!(!service.verify(&format!("{token}\n")));
    assert!(!service.verify(&token.replacen('.', " .", 1)));
}

#[test]
fn inspect_returns_padded_claims() {
    let service = JwtService::with_secret(b"secret");
    let original = claims(json!({"sub": "alice", "roles": ["editor"], "n": 1.5}));
    let token = service.issue(&original).unwrap();

    let mut expected = original.clone();
    for name in quire_jwt::REGISTERED_CLAIMS {
        expected.entry(name).or_insert(Value::Null);
    }
    assert_eq!(inspect_unverified(&token), Some(expected));
}

#[test]
fn concurrent_handlers_share_one_service() {
    let service = JwtService::with_secret(b"secret");

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let service = &service;
            scope.spawn(move || {
                for i in 0..50 {
                    let token = service
                        .issue(&claims(json!({"worker": worker, "i": i})))
                        .unwrap();
                    assert!(service.verify(&token));
                }
            });
        }
    });
}
