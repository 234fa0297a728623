//! Opaque bearer session lifecycle.
//!
//! States: active → revoked | expired, both terminal. Creation enforces
//! at-most-one-active-session by revoking every previous session of the
//! user inside the same transaction that inserts the new row.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use servia_core::config::SessionConfig;
use servia_core::error::AppError;
use servia_core::result::AppResult;
use servia_database::repositories::session::SessionRepository;
use servia_database::repositories::user::UserRepository;
use servia_entity::session::{CreateSession, Session};
use servia_entity::user::User;

use crate::token;

/// A freshly created session together with its raw bearer token.
///
/// The raw token leaves the store exactly once, here. Only its SHA-256
/// digest is persisted, and `Debug` output redacts the token.
pub struct IssuedSession {
    /// The persisted session row.
    pub session: Session,
    /// The raw bearer token for the client.
    pub token: String,
}

impl std::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedSession")
            .field("session", &self.session.id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Creates, validates, touches, and revokes sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    session_repo: Arc<SessionRepository>,
    user_repo: Arc<UserRepository>,
    config: SessionConfig,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(
        session_repo: Arc<SessionRepository>,
        user_repo: Arc<UserRepository>,
        config: SessionConfig,
    ) -> Self {
        Self {
            session_repo,
            user_repo,
            config,
        }
    }

    /// Create a session for a user inside a tenant.
    ///
    /// Any previous non-revoked sessions of the user are revoked with
    /// reason "new login" in the same transaction as the insert.
    pub async fn create(
        &self,
        user: &User,
        tenant_id: Uuid,
        user_agent: Option<&str>,
    ) -> AppResult<IssuedSession> {
        let raw = token::generate(self.config.token_bytes);
        let expires_at = Utc::now() + Duration::hours(self.config.ttl_hours as i64);

        let session = self
            .session_repo
            .create_superseding(&CreateSession {
                user_id: user.id,
                token_hash: token::digest(&raw),
                tenant_id,
                active_tenant_id: tenant_id,
                expires_at,
                user_agent: user_agent.map(String::from),
            })
            .await?;

        info!(
            user_id = %user.id,
            session_id = %session.id,
            tenant_id = %tenant_id,
            "Session created"
        );

        Ok(IssuedSession {
            session,
            token: raw,
        })
    }

    /// Validate a raw bearer token and return the session + owning user.
    ///
    /// Failure ladder: unknown hash → `SessionNotFound`; revoked →
    /// `SessionRevoked` (carrying the stored reason); past expiry →
    /// `SessionExpired`. Success updates `last_seen_at` fire-and-forget:
    /// a failed touch is logged and never fails the validation.
    pub async fn validate(&self, raw_token: &str) -> AppResult<(Session, User)> {
        let hash = token::digest(raw_token);

        let session = self
            .session_repo
            .find_by_token_hash(&hash)
            .await?
            .ok_or_else(AppError::session_not_found)?;

        if session.is_revoked() {
            return Err(AppError::session_revoked(session.revoked_reason.as_deref()));
        }
        if session.is_expired_at(Utc::now()) {
            return Err(AppError::session_expired());
        }

        let user = self
            .user_repo
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(AppError::session_not_found)?;

        if let Err(e) = self.session_repo.touch(session.id).await {
            warn!(session_id = %session.id, error = %e, "Failed to touch session");
        }

        Ok((session, user))
    }

    /// Revoke the session behind a raw token.
    ///
    /// Idempotent: revoking an unknown or already-revoked token is Ok.
    pub async fn revoke(&self, raw_token: &str, reason: &str) -> AppResult<()> {
        let hash = token::digest(raw_token);
        let revoked = self.session_repo.revoke_by_token_hash(&hash, reason).await?;
        if revoked > 0 {
            info!(reason, "Session revoked");
        }
        Ok(())
    }

    /// Move a session into a new active tenant.
    ///
    /// Only called after the access controller has approved the switch.
    pub async fn switch_active_tenant(
        &self,
        session: &Session,
        new_tenant_id: Uuid,
    ) -> AppResult<()> {
        self.session_repo
            .switch_active_tenant(session.id, new_tenant_id)
            .await
    }
}
