//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserRole;

/// An immutable audit record of a privileged cross-tenant action.
///
/// Written for both successful and denied attempts; never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// The user who performed (or attempted) the action.
    pub actor_user_id: Uuid,
    /// The actor's role at the time of the action.
    pub actor_role: UserRole,
    /// The action, e.g. `"tenant.switch"`.
    pub action: String,
    /// The tenant the action targeted.
    pub target_tenant_id: Option<Uuid>,
    /// Request path.
    pub request_path: String,
    /// Request method.
    pub request_method: String,
    /// Actor's IP address.
    pub ip_address: Option<String>,
    /// Actor's User-Agent.
    pub user_agent: Option<String>,
    /// Free-form reason supplied by the actor.
    pub reason: Option<String>,
    /// State before the action (JSON).
    pub before_state: Option<serde_json::Value>,
    /// State after the action (JSON).
    pub after_state: Option<serde_json::Value>,
    /// Whether the action was allowed and applied.
    pub success: bool,
    /// Error message when the action was denied or failed.
    pub error_message: Option<String>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// The acting user.
    pub actor_user_id: Uuid,
    /// The actor's role.
    pub actor_role: UserRole,
    /// The action performed.
    pub action: String,
    /// The tenant targeted.
    pub target_tenant_id: Option<Uuid>,
    /// Request path.
    pub request_path: String,
    /// Request method.
    pub request_method: String,
    /// Actor's IP address.
    pub ip_address: Option<String>,
    /// Actor's User-Agent.
    pub user_agent: Option<String>,
    /// Free-form reason.
    pub reason: Option<String>,
    /// State before the action.
    pub before_state: Option<serde_json::Value>,
    /// State after the action.
    pub after_state: Option<serde_json::Value>,
    /// Whether the action succeeded.
    pub success: bool,
    /// Error message on failure.
    pub error_message: Option<String>,
}
