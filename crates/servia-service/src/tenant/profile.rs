//! Tenant profile viewing and updating.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use servia_auth::access::AccessController;
use servia_core::error::AppError;
use servia_core::result::AppResult;
use servia_database::repositories::tenant::TenantRepository;
use servia_entity::tenant::{Tenant, TenantProfilePatch};

use crate::context::RequestContext;
use crate::tenant::validate::validate_patch;

/// Handles tenant profile reads and writes.
#[derive(Debug, Clone)]
pub struct TenantProfileService {
    /// Tenant repository.
    tenant_repo: Arc<TenantRepository>,
    /// Cross-tenant access control.
    access: Arc<AccessController>,
}

impl TenantProfileService {
    /// Creates a new tenant profile service.
    pub fn new(tenant_repo: Arc<TenantRepository>, access: Arc<AccessController>) -> Self {
        Self {
            tenant_repo,
            access,
        }
    }

    /// Gets a tenant's public profile.
    pub async fn get_profile(&self, ctx: &RequestContext, tenant_id: Uuid) -> AppResult<Tenant> {
        self.access
            .ensure_tenant_access(&ctx.user, tenant_id)
            .await?;

        self.tenant_repo
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tenant not found"))
    }

    /// Applies a partial update to a tenant's profile.
    ///
    /// Every present field is validated before any write; an invalid
    /// field leaves the stored profile untouched.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        tenant_id: Uuid,
        patch: TenantProfilePatch,
    ) -> AppResult<Tenant> {
        self.access
            .authorize_profile_edit(&ctx.user, tenant_id)
            .await?;

        validate_patch(&patch)?;

        let tenant = self
            .tenant_repo
            .update_profile(tenant_id, &patch, ctx.user.id)
            .await?
            .ok_or_else(|| AppError::not_found("Tenant not found"))?;

        info!(
            tenant_id = %tenant.id,
            updated_by = %ctx.user.id,
            "Tenant profile updated"
        );

        Ok(tenant)
    }
}
