//! Technical report repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use servia_core::error::{AppError, ErrorKind};
use servia_core::result::AppResult;
use servia_entity::report::TechnicalReport;

/// Repository for technical reports and their client sharing tokens.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Create a new report repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a report by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TechnicalReport>> {
        sqlx::query_as::<_, TechnicalReport>("SELECT * FROM technical_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find report", e))
    }

    /// Store the client sharing token unless one already exists.
    ///
    /// Returns the token now on the row, which is the existing one when a
    /// concurrent issuance won.
    pub async fn set_client_token_if_absent(
        &self,
        report_id: Uuid,
        token: &str,
    ) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, Option<String>>(
            "UPDATE technical_reports \
             SET client_token = COALESCE(client_token, $2), updated_at = NOW() \
             WHERE id = $1 RETURNING client_token",
        )
        .bind(report_id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map(Option::flatten)
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set client token", e)
        })
    }
}
