//! Session lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Smallest allowed raw token size. Anything shorter is rejected at
/// configuration load rather than silently weakening tokens.
pub const MIN_TOKEN_BYTES: usize = 32;

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session time-to-live in hours from the moment of login.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Raw token length in bytes before encoding; at least
    /// [`MIN_TOKEN_BYTES`].
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            token_bytes: default_token_bytes(),
        }
    }
}

fn default_ttl_hours() -> u64 {
    8
}

fn default_token_bytes() -> usize {
    32
}
