//! Random secret generation.
//!
//! Secrets come from the operating system CSPRNG. If the OS source fails the
//! buffer is filled from a time-seeded non-cryptographic generator instead and
//! a warning is logged, so key generation at install time never aborts.

use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng, TryRngCore};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default length of a generated signing secret, matching the HS256 tag size.
pub const DEFAULT_SECRET_LEN: usize = 32;

/// Fill `buf` with random bytes.
pub fn fill_random(buf: &mut [u8]) {
    if let Err(err) = OsRng.try_fill_bytes(buf) {
        tracing::warn!(error = %err, "OS random source failed, using non-cryptographic fallback");
        fallback_rng().fill_bytes(buf);
    }
}

/// Generate a random secret of `len` bytes.
pub fn generate_secret(len: usize) -> Vec<u8> {
    let mut secret = vec![0u8; len];
    fill_random(&mut secret);
    secret
}

/// A random non-negative 63-bit integer.
pub fn random_u63() -> i64 {
    let mut bytes = [0u8; 8];
    fill_random(&mut bytes);
    i64::from_be_bytes(bytes) & i64::MAX
}

fn fallback_rng() -> SmallRng {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    SmallRng::seed_from_u64(seed)
}
