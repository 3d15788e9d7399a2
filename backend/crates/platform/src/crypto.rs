//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate cryptographically secure random bytes
///
/// Uses the thread-local CSPRNG, which is seeded from the OS and reseeds
/// periodically.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode bytes as URL-safe base64 without padding (cookie-safe)
pub fn to_base64url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Constant-time comparison to prevent timing attacks
///
/// Only the length check short-circuits; callers comparing secrets should
/// pass fixed-length digests.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Short hex fingerprint of a secret, safe to put in logs
pub fn log_fingerprint(secret: &[u8]) -> String {
    sha256(secret)[..4]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
