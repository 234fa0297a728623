//! Technical report entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A technical report produced inside a tenant.
///
/// The report itself is managed elsewhere; this core only issues the
/// opaque client-facing sharing token for it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TechnicalReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// The tenant the report belongs to.
    pub tenant_id: Uuid,
    /// The user who authored the report.
    pub created_by: Uuid,
    /// Report title.
    pub title: String,
    /// Opaque client-facing sharing token, issued at most once.
    pub client_token: Option<String>,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// When the report was last updated.
    pub updated_at: DateTime<Utc>,
}
