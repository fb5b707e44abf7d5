//! Signing key storage.
//!
//! The key is published through an [`ArcSwap`], so readers take one snapshot
//! per operation and observe either the old or the new key as a whole, even
//! if the key is replaced concurrently.

use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;

/// An HS256 signing secret.
///
/// An empty key means "not configured".
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Wrap raw secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Load a key from a hex-encoded string.
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(hex.trim()).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// Atomically replaceable holder for the current signing key.
///
/// Starts `Unset` (empty key). [`KeyStore::configure`] with a non-empty
/// secret arms it; configuring again replaces the key and invalidates every
/// token signed with the previous one. Configuring with an empty secret
/// disarms it.
pub struct KeyStore {
    current: ArcSwap<SigningKey>,
}

impl KeyStore {
    /// Create an unset key store.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(SigningKey::default()),
        }
    }

    /// Create a key store armed with `secret`.
    pub fn with_secret(secret: &[u8]) -> Self {
        let store = Self::new();
        store.configure(secret);
        store
    }

    /// Install `secret` as the signing key.
    pub fn configure(&self, secret: &[u8]) {
        if self.current.load().as_bytes() == secret {
            return;
        }

        if secret.is_empty() {
            tracing::warn!("signing key cleared, token issuing and verification disabled");
        } else {
            tracing::info!(key_len = secret.len(), "signing key configured");
        }

        self.current.store(Arc::new(SigningKey::new(secret)));
    }

    /// Snapshot of the current key, valid for the duration of one operation.
    pub fn snapshot(&self) -> Arc<SigningKey> {
        self.current.load_full()
    }

    /// Whether a non-empty key is installed.
    pub fn is_armed(&self) -> bool {
        !self.current.load().is_empty()
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore")
            .field("armed", &self.is_armed())
            .finish()
    }
}
