//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the marketplace.
///
/// A closed enum so that a new role fails to compile at every dispatch
/// site instead of silently falling through to "denied".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Cross-tenant operator; every action on a specific tenant is gated
    /// by an authorization predicate and audited.
    SuperUser,
    /// Tenant administrator; may edit their own tenant's profile.
    Admin,
    /// Field technician; ordinary tenant-bound user.
    Technician,
}

impl UserRole {
    /// Check if this role is the distinguished cross-tenant role.
    pub fn is_super(&self) -> bool {
        matches!(self, Self::SuperUser)
    }

    /// Check if this role may read or mutate tenant profiles.
    pub fn can_manage_tenant(&self) -> bool {
        match self {
            Self::SuperUser | Self::Admin => true,
            Self::Technician => false,
        }
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperUser => "super_user",
            Self::Admin => "admin",
            Self::Technician => "technician",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = servia_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_user" => Ok(Self::SuperUser),
            "admin" => Ok(Self::Admin),
            "technician" => Ok(Self::Technician),
            _ => Err(servia_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: super_user, admin, technician"
            ))),
        }
    }
}
