//! Password verification against stored credentials.

use sha2::{Digest, Sha256};

use servia_entity::user::User;

/// Verifies a submitted password against a user's stored credential.
///
/// First match wins: the SHA-256 hex digest is checked when a hash is
/// stored; otherwise the legacy plaintext field is compared directly.
/// A user with neither field can never authenticate through this path.
#[derive(Debug, Clone)]
pub struct CredentialVerifier;

impl CredentialVerifier {
    /// Creates a new credential verifier.
    pub fn new() -> Self {
        Self
    }

    /// Verify a submitted password. Returns `true` only on a match.
    pub fn verify(&self, submitted: &str, user: &User) -> bool {
        if let Some(stored_hash) = &user.password_hash {
            let digest = hex::encode(Sha256::digest(submitted.as_bytes()));
            return digest.eq_ignore_ascii_case(stored_hash);
        }
        if let Some(plain) = &user.password_plain {
            return submitted == plain;
        }
        false
    }
}

impl Default for CredentialVerifier {
    fn default() -> Self {
        Self::new()
    }
}
