//! HMAC-SHA-256 signing and tag comparison.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Length in bytes of an HS256 tag.
pub const TAG_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// Compute `HMAC-SHA-256(key, input)`.
pub fn sign(key: &[u8], input: &[u8]) -> [u8; TAG_LEN] {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(input);

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}

/// Compare two tags in constant time.
///
/// Returns `false` on length mismatch. Running time does not depend on the
/// position of the first differing byte.
pub fn tags_equal(expected: &[u8], actual: &[u8]) -> bool {
    expected.ct_eq(actual).into()
}
