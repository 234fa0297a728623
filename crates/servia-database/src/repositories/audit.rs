//! Audit log repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use servia_core::error::{AppError, ErrorKind};
use servia_core::result::AppResult;
use servia_entity::audit::{AuditLogEntry, CreateAuditLogEntry};

/// Repository for the append-only audit log.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an audit log entry.
    pub async fn create(&self, data: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log (actor_user_id, actor_role, action, target_tenant_id, \
                request_path, request_method, ip_address, user_agent, reason, \
                before_state, after_state, success, error_message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(data.actor_user_id)
        .bind(data.actor_role)
        .bind(&data.action)
        .bind(data.target_tenant_id)
        .bind(&data.request_path)
        .bind(&data.request_method)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .bind(&data.reason)
        .bind(&data.before_state)
        .bind(&data.after_state)
        .bind(data.success)
        .bind(&data.error_message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create audit entry", e))
    }

    /// List entries for an actor, newest first.
    pub async fn find_by_actor(&self, actor_user_id: Uuid) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT * FROM audit_log WHERE actor_user_id = $1 ORDER BY created_at DESC",
        )
        .bind(actor_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list audit entries", e))
    }
}
