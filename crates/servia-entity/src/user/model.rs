//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;
use super::status::UserStatus;

/// A registered user.
///
/// Ordinary users are permanently bound to their tenant via `tenant_id`;
/// super users carry no tenant binding of their own.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, unique across the platform.
    pub email: String,
    /// Role (closed enum).
    pub role: UserRole,
    /// Account status.
    pub status: UserStatus,
    /// The tenant this user belongs to (None for super users).
    pub tenant_id: Option<Uuid>,
    /// SHA-256 hex digest of the password. Checked first when present.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Legacy plaintext password, consulted only when no hash is stored.
    #[serde(skip_serializing)]
    pub password_plain: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account may authenticate right now.
    pub fn can_login(&self) -> bool {
        self.status.can_login()
    }

    /// Check if this user holds the cross-tenant role.
    pub fn is_super(&self) -> bool {
        self.role.is_super()
    }
}
