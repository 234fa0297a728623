//! Connection pool settings.

use serde::{Deserialize, Serialize};

/// Settings for the PostgreSQL connection pool.
///
/// Only `url` is required; the sizing knobs default to values sized
/// for a single server process and are overridden per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL, including credentials.
    pub url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections kept open even when idle.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait when acquiring a connection before giving up.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Seconds an idle connection may linger before it is closed.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

fn default_max_connections() -> u32 {
    16
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    600
}
