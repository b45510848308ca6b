//! Token key fingerprinting.
//!
//! Operators compare the logged fingerprint across replicas to confirm they
//! sign with the same key, without the key itself reaching the logs.

use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 of `key`, as 16 lowercase hex characters.
///
/// # Examples
///
/// ```rust
/// use backend::outbound::security::token_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&[b'a'; 64]);
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &[u8]) -> String {
    let digest = Sha256::digest(key);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
