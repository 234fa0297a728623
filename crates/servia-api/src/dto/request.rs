//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use servia_entity::tenant::TenantProfilePatch;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Session endpoint actions.
///
/// The `action` discriminator is closed: anything outside this set is a
/// deserialization error, answered as a malformed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionActionRequest {
    /// Validate a session token and return the session, user, and tenant.
    Validate {
        /// Token, if not supplied via `Authorization: Bearer`.
        #[serde(default)]
        token: Option<String>,
    },
    /// Revoke a session token. Unknown tokens are a no-op.
    Revoke {
        /// Token, if not supplied via `Authorization: Bearer`.
        #[serde(default)]
        token: Option<String>,
        /// Reason recorded on the session row.
        #[serde(default)]
        reason: Option<String>,
    },
    /// List the tenants the caller may switch into.
    ListTenants {
        /// Token, if not supplied via `Authorization: Bearer`.
        #[serde(default)]
        token: Option<String>,
    },
    /// Switch the session's active tenant (super users only).
    SwitchTenant {
        /// Token, if not supplied via `Authorization: Bearer`.
        #[serde(default)]
        token: Option<String>,
        /// Target tenant.
        #[serde(rename = "tenantId")]
        tenant_id: Uuid,
        /// Free-form justification recorded in the audit log.
        #[serde(default)]
        reason: Option<String>,
    },
}

/// Tenant endpoint actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TenantActionRequest {
    /// Read a tenant's profile. Defaults to the session's active tenant.
    GetProfile {
        /// Token, if not supplied via `Authorization: Bearer`.
        #[serde(default)]
        token: Option<String>,
        /// Target tenant; defaults to the session's active tenant.
        #[serde(default, rename = "tenantId")]
        tenant_id: Option<Uuid>,
    },
    /// Apply a partial profile update.
    UpdateProfile {
        /// Token, if not supplied via `Authorization: Bearer`.
        #[serde(default)]
        token: Option<String>,
        /// Target tenant; defaults to the session's active tenant.
        #[serde(default, rename = "tenantId")]
        tenant_id: Option<Uuid>,
        /// Fields to update; absent fields are left untouched.
        data: TenantProfilePatch,
    },
}
