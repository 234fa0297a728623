//! Tenant directory repository.

use sqlx::PgPool;
use uuid::Uuid;

use servia_core::error::{AppError, ErrorKind};
use servia_core::result::AppResult;
use servia_entity::tenant::{Tenant, TenantProfilePatch};

/// Repository for tenant and tenant-domain point lookups.
///
/// Every lookup used for resolution or authorization filters on active
/// status; inactive tenants are invisible to this core.
#[derive(Debug, Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    /// Create a new tenant repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the active tenant mapped to a literal host via `tenant_domains`.
    ///
    /// Honored only when both the domain row and the tenant are active.
    pub async fn find_active_by_domain(&self, host: &str) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, Tenant>(
            "SELECT t.* FROM tenants t \
             JOIN tenant_domains d ON d.tenant_id = t.id \
             WHERE d.domain = $1 AND d.status = 'active' AND t.status = 'active'",
        )
        .bind(host)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to look up tenant by domain", e)
        })
    }

    /// Find an active tenant whose subdomain or slug equals the label.
    pub async fn find_active_by_subdomain_or_slug(&self, label: &str) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants \
             WHERE (subdomain = $1 OR slug = $1) AND status = 'active' \
             LIMIT 1",
        )
        .bind(label)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to look up tenant by subdomain",
                e,
            )
        })
    }

    /// Find an active tenant by ID (used by the own-tenant fallback path).
    pub async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1 AND status = 'active'")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find tenant by id", e)
            })
    }

    /// Find a tenant by ID regardless of status (profile reads).
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find tenant by id", e)
            })
    }

    /// List all active tenants, ordered by name (super-user tenant picker).
    pub async fn list_active(&self) -> AppResult<Vec<Tenant>> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE status = 'active' ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list active tenants", e)
            })
    }

    /// Apply a validated profile patch and stamp `updated_at`/`updated_by`.
    ///
    /// The patch must already be validated; this method writes whatever it
    /// is given. `COALESCE` keeps absent fields untouched.
    pub async fn update_profile(
        &self,
        tenant_id: Uuid,
        patch: &TenantProfilePatch,
        updated_by: Uuid,
    ) -> AppResult<Option<Tenant>> {
        sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET \
                name = COALESCE($2, name), \
                status = COALESCE($3::tenant_status, status), \
                phone = COALESCE($4, phone), \
                contact_email = COALESCE($5, contact_email), \
                address = COALESCE($6, address), \
                locality = COALESCE($7, locality), \
                postal_code = COALESCE($8, postal_code), \
                logo_image = COALESCE($9, logo_image), \
                updated_at = NOW(), \
                updated_by = $10 \
             WHERE id = $1 RETURNING *",
        )
        .bind(tenant_id)
        .bind(&patch.name)
        .bind(&patch.status)
        .bind(&patch.phone)
        .bind(&patch.contact_email)
        .bind(&patch.address)
        .bind(&patch.locality)
        .bind(&patch.postal_code)
        .bind(&patch.logo_image)
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update tenant profile", e)
        })
    }
}
