//! Embedded migration runner.
//!
//! Migrations live in the workspace-root `migrations/` directory and
//! are compiled into the binary, so a deployment needs no extra files.

use sqlx::PgPool;
use tracing::info;

use servia_core::error::{AppError, ErrorKind};
use servia_core::result::AppResult;

/// Apply all pending migrations.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("../../migrations").run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!("Database schema is up to date");
    Ok(())
}
