//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An opaque bearer session.
///
/// Created at login, revoked by logout, by a superseding login, or by a
/// best-effort client-exit notification. Only the SHA-256 hash of the
/// bearer token is ever stored; revocation is terminal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hex digest of the raw bearer token.
    pub token_hash: String,
    /// The tenant the session operates under; follows tenant switches.
    pub tenant_id: Uuid,
    /// The tenant the session is currently switched into.
    ///
    /// Meaningful only for super users; always equals the user's own
    /// tenant otherwise.
    pub active_tenant_id: Uuid,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// When the session was revoked (terminal).
    pub revoked_at: Option<DateTime<Utc>>,
    /// Why the session was revoked.
    pub revoked_reason: Option<String>,
    /// Last successful validation.
    pub last_seen_at: DateTime<Utc>,
    /// User-Agent header at login.
    pub user_agent: Option<String>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check whether the session's absolute expiry has passed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Data required to create a new session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// SHA-256 hex digest of the raw bearer token.
    pub token_hash: String,
    /// Tenant the session is issued under.
    pub tenant_id: Uuid,
    /// Initial active tenant (same as `tenant_id`).
    pub active_tenant_id: Uuid,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// User-Agent header at login.
    pub user_agent: Option<String>,
}
