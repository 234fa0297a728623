//! Server-side authorization predicate calls.
//!
//! The tenant directory exposes two boolean SQL functions,
//! `can_access_tenant(user_id, tenant_id)` and
//! `can_edit_tenant(user_id, tenant_id)`. This repository invokes them
//! and reports a missing predicate structurally instead of by matching
//! error text.

use sqlx::PgPool;
use uuid::Uuid;

use servia_core::error::{AppError, ErrorKind};
use servia_core::result::AppResult;

/// Postgres SQLSTATE for `undefined_function`.
const UNDEFINED_FUNCTION: &str = "42883";

/// Outcome of invoking an authorization predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateOutcome {
    /// The predicate ran and answered.
    Answer(bool),
    /// The predicate function does not exist in this database.
    NotInstalled,
}

/// Repository wrapping the named authorization predicates.
#[derive(Debug, Clone)]
pub struct AuthzRepository {
    pool: PgPool,
}

impl AuthzRepository {
    /// Create a new authorization predicate repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Call `can_access_tenant(user_id, tenant_id)`.
    pub async fn can_access_tenant(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> AppResult<PredicateOutcome> {
        self.call("can_access_tenant", user_id, tenant_id).await
    }

    /// Call `can_edit_tenant(user_id, tenant_id)`.
    pub async fn can_edit_tenant(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> AppResult<PredicateOutcome> {
        self.call("can_edit_tenant", user_id, tenant_id).await
    }

    async fn call(
        &self,
        predicate: &'static str,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> AppResult<PredicateOutcome> {
        let query = format!("SELECT {predicate}($1, $2)");
        let result = sqlx::query_scalar::<_, bool>(&query)
            .bind(user_id)
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(allowed) => Ok(PredicateOutcome::Answer(allowed)),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNDEFINED_FUNCTION) => {
                Ok(PredicateOutcome::NotInstalled)
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::AuthorizationCheckFailed,
                format!("Authorization predicate {predicate} failed"),
                e,
            )),
        }
    }
}
