//! Tenant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::TenantStatus;

/// An isolated customer organization; the unit of data partitioning.
///
/// Tenants are provisioned externally; this service never creates them,
/// it only resolves them and mutates their public profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: Uuid,
    /// URL-safe short name, unique across the platform.
    pub slug: String,
    /// Subdomain label under the shared base domain (if assigned).
    pub subdomain: Option<String>,
    /// Lifecycle status.
    pub status: TenantStatus,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email address.
    pub contact_email: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City / locality.
    pub locality: Option<String>,
    /// Postal code (`XXXX-XXX`).
    pub postal_code: Option<String>,
    /// Logo as a base64 data URI.
    pub logo_image: Option<String>,
    /// When the tenant was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
    /// The user who last updated the profile.
    pub updated_by: Option<Uuid>,
}

impl Tenant {
    /// Check whether the tenant may authenticate users.
    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }
}

/// Partial update applied to a tenant's public profile.
///
/// `None` fields are left untouched; validation happens in the profile
/// service before any field reaches the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantProfilePatch {
    /// New display name.
    pub name: Option<String>,
    /// New lifecycle status (`"active"` / `"inactive"`).
    pub status: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New contact email.
    pub contact_email: Option<String>,
    /// New street address.
    pub address: Option<String>,
    /// New locality.
    pub locality: Option<String>,
    /// New postal code.
    pub postal_code: Option<String>,
    /// New logo data URI.
    pub logo_image: Option<String>,
}
