//! Session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use servia_core::error::{AppError, ErrorKind, REVOKED_NEW_LOGIN};
use servia_core::result::AppResult;
use servia_entity::session::{CreateSession, Session};

/// Repository for session rows, keyed by token hash.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by the SHA-256 hex digest of its bearer token.
    ///
    /// Revoked and expired rows are returned too; the caller decides
    /// which failure to surface.
    pub async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find session by token", e)
            })
    }

    /// Revoke every non-revoked session of the user, then insert the new
    /// row, both inside a single transaction.
    ///
    /// Running the two statements in one transaction is what enforces
    /// at-most-one-active-session under concurrent logins: either both
    /// land or neither does, and two racing logins serialize on the
    /// user's rows.
    pub async fn create_superseding(&self, data: &CreateSession) -> AppResult<Session> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(
            "UPDATE sessions SET revoked_at = NOW(), revoked_reason = $2 \
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(data.user_id)
        .bind(REVOKED_NEW_LOGIN)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke previous sessions", e)
        })?;

        let session = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (user_id, token_hash, tenant_id, active_tenant_id, expires_at, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.token_hash)
        .bind(data.tenant_id)
        .bind(data.active_tenant_id)
        .bind(data.expires_at)
        .bind(&data.user_agent)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit session creation", e)
        })?;

        Ok(session)
    }

    /// Update `last_seen_at` on successful validation.
    pub async fn touch(&self, session_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET last_seen_at = NOW() WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to touch session", e)
            })?;
        Ok(())
    }

    /// Revoke the session with the given token hash.
    ///
    /// Idempotent: already-revoked rows keep their original `revoked_at`
    /// and reason; an unknown hash affects zero rows and is not an error.
    pub async fn revoke_by_token_hash(&self, token_hash: &str, reason: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = NOW(), revoked_reason = $2 \
             WHERE token_hash = $1 AND revoked_at IS NULL",
        )
        .bind(token_hash)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke session", e))?;

        Ok(result.rows_affected())
    }

    /// Move the session into a new active tenant and touch `last_seen_at`.
    ///
    /// Only reachable after the access controller has approved the switch.
    pub async fn switch_active_tenant(
        &self,
        session_id: Uuid,
        new_tenant_id: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE sessions SET tenant_id = $2, active_tenant_id = $2, last_seen_at = NOW() \
             WHERE id = $1 AND revoked_at IS NULL",
        )
        .bind(session_id)
        .bind(new_tenant_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to switch active tenant", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::session_not_found());
        }
        Ok(())
    }

    /// Delete long-dead rows (expired or revoked before the cutoff).
    ///
    /// Operational pruning only; validation never depends on it.
    pub async fn cleanup_expired(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM sessions WHERE expires_at < $1 \
             OR (revoked_at IS NOT NULL AND revoked_at < $1)",
        )
        .bind(before)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clean up sessions", e)
        })?;

        Ok(result.rows_affected())
    }
}
