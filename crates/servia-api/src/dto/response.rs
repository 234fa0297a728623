//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use servia_entity::session::Session;
use servia_entity::tenant::Tenant;
use servia_entity::user::User;

/// User summary for responses. Never carries credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Role.
    pub role: String,
    /// Status.
    pub status: String,
    /// The user's home tenant (None for super users).
    pub tenant_id: Option<Uuid>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            status: user.status.to_string(),
            tenant_id: user.tenant_id,
        }
    }
}

/// Tenant profile for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantResponse {
    /// Tenant ID.
    pub id: Uuid,
    /// URL-safe short name.
    pub slug: String,
    /// Subdomain label, if assigned.
    pub subdomain: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub contact_email: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City / locality.
    pub locality: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Logo data URI.
    pub logo_image: Option<String>,
    /// Last profile update.
    pub updated_at: DateTime<Utc>,
}

impl From<&Tenant> for TenantResponse {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id,
            slug: tenant.slug.clone(),
            subdomain: tenant.subdomain.clone(),
            status: tenant.status.to_string(),
            name: tenant.name.clone(),
            phone: tenant.phone.clone(),
            contact_email: tenant.contact_email.clone(),
            address: tenant.address.clone(),
            locality: tenant.locality.clone(),
            postal_code: tenant.postal_code.clone(),
            logo_image: tenant.logo_image.clone(),
            updated_at: tenant.updated_at,
        }
    }
}

/// Session summary for responses. The token hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session ID.
    pub id: Uuid,
    /// Tenant the session is scoped to.
    pub active_tenant_id: Uuid,
    /// Expiry instant.
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
    /// Last activity.
    pub last_seen_at: DateTime<Utc>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            active_tenant_id: session.active_tenant_id,
            expires_at: session.expires_at,
            last_seen_at: session.last_seen_at,
            created_at: session.created_at,
        }
    }
}

/// The freshly issued token returned exactly once at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedTokenResponse {
    /// The raw bearer token.
    pub token: String,
    /// Expiry instant.
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Always `true`.
    pub success: bool,
    /// The authenticated user.
    pub user: UserResponse,
    /// The issued session token.
    pub session: IssuedTokenResponse,
    /// The tenant the session is bound to.
    pub tenant: TenantResponse,
}

/// Session validation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// Always `true`.
    pub success: bool,
    /// The session owner.
    pub user: UserResponse,
    /// The validated session.
    pub session: SessionResponse,
    /// The session's active tenant.
    pub tenant: Option<TenantResponse>,
    /// Server clock, for client-side expiry countdowns.
    #[serde(rename = "serverNow")]
    pub server_now: DateTime<Utc>,
}

/// Session revoke response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeResponse {
    /// Always `true` (revocation is idempotent).
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Server clock.
    #[serde(rename = "serverNow")]
    pub server_now: DateTime<Utc>,
}

/// Tenant listing for super users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantListResponse {
    /// Always `true`.
    pub success: bool,
    /// Tenants the caller may operate in.
    pub tenants: Vec<TenantResponse>,
    /// Server clock.
    #[serde(rename = "serverNow")]
    pub server_now: DateTime<Utc>,
}

/// Tenant switch response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchTenantResponse {
    /// Always `true`.
    pub success: bool,
    /// The new active tenant.
    pub tenant: TenantResponse,
    /// Server clock.
    #[serde(rename = "serverNow")]
    pub server_now: DateTime<Utc>,
}

/// Tenant profile response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantProfileResponse {
    /// Always `true`.
    pub success: bool,
    /// The tenant profile.
    pub tenant: TenantResponse,
}

/// Technical report client link response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientLinkResponse {
    /// Always `true`.
    pub success: bool,
    /// The report's opaque client token.
    pub client_token: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `true` when the service answers.
    pub success: bool,
    /// Service status.
    pub status: String,
    /// Database connectivity.
    pub database: String,
    /// Crate version.
    pub version: String,
}
