//! Opaque bearer token generation and digests.
//!
//! Raw tokens exist only transiently: generated here, returned to the
//! caller exactly once, and thereafter compared solely by SHA-256 digest.
//! They are never logged or serialized anywhere else.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a cryptographically random opaque token.
///
/// `bytes` random bytes encoded URL-safe without padding. The 32-byte
/// floor on configured sizes is enforced when configuration is loaded.
pub fn generate(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

/// SHA-256 hex digest of a raw token, the only stored representation.
pub fn digest(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
