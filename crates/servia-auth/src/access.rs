//! Cross-tenant access control.
//!
//! Decides whether a user may act within a resolved tenant. Ordinary
//! users are bound to their own tenant; super users are gated by the
//! directory's authorization predicates, and every switch attempt,
//! allowed or denied, lands in the audit log.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use servia_core::error::AppError;
use servia_core::result::AppResult;
use servia_database::repositories::audit::AuditLogRepository;
use servia_database::repositories::authz::{AuthzRepository, PredicateOutcome};
use servia_database::repositories::tenant::TenantRepository;
use servia_entity::audit::CreateAuditLogEntry;
use servia_entity::session::Session;
use servia_entity::tenant::Tenant;
use servia_entity::user::{User, UserRole};

use crate::session::SessionStore;

/// Audit action recorded for tenant switches.
const ACTION_TENANT_SWITCH: &str = "tenant.switch";

/// Request metadata captured into audit entries.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Request path.
    pub path: String,
    /// Request method.
    pub method: String,
    /// Client IP address.
    pub ip_address: Option<String>,
    /// Client User-Agent.
    pub user_agent: Option<String>,
}

/// Gates tenant-scoped actions for ordinary and super users.
#[derive(Debug, Clone)]
pub struct AccessController {
    tenant_repo: Arc<TenantRepository>,
    authz_repo: Arc<AuthzRepository>,
    audit_repo: Arc<AuditLogRepository>,
}

impl AccessController {
    /// Creates a new access controller.
    pub fn new(
        tenant_repo: Arc<TenantRepository>,
        authz_repo: Arc<AuthzRepository>,
        audit_repo: Arc<AuditLogRepository>,
    ) -> Self {
        Self {
            tenant_repo,
            authz_repo,
            audit_repo,
        }
    }

    /// Decide which tenant the user operates in for this request.
    ///
    /// Ordinary users must match the resolved tenant exactly; when no
    /// tenant resolved from the host, the user's own tenant is tried as
    /// a last resort (logged as a fallback, not a primary trust
    /// decision). Super users are never denied on mismatch grounds but
    /// must pass `can_access_tenant` for the specific target.
    pub async fn authorize_tenant(
        &self,
        user: &User,
        resolved: Option<&Tenant>,
    ) -> AppResult<Tenant> {
        if user.role.is_super() {
            return self.authorize_super(user, resolved).await;
        }

        let own_tenant_id = user.tenant_id.ok_or_else(AppError::tenant_unresolved)?;

        match resolved {
            Some(tenant) => {
                if tenant.id != own_tenant_id {
                    return Err(AppError::tenant_mismatch());
                }
                Ok(tenant.clone())
            }
            None => {
                // Host did not resolve; fall back to the user's own tenant.
                let tenant = self
                    .tenant_repo
                    .find_active_by_id(own_tenant_id)
                    .await?
                    .ok_or_else(AppError::tenant_unresolved)?;
                warn!(
                    user_id = %user.id,
                    tenant_id = %tenant.id,
                    "Tenant resolution fell back to the user's own tenant"
                );
                Ok(tenant)
            }
        }
    }

    async fn authorize_super(&self, user: &User, resolved: Option<&Tenant>) -> AppResult<Tenant> {
        let tenant = match resolved {
            Some(tenant) => tenant.clone(),
            None => {
                let own = user.tenant_id.ok_or_else(AppError::tenant_unresolved)?;
                self.tenant_repo
                    .find_active_by_id(own)
                    .await?
                    .ok_or_else(AppError::tenant_unresolved)?
            }
        };

        self.check_access_predicate(user.id, tenant.id).await?;
        Ok(tenant)
    }

    /// Check whether the user may read data belonging to a tenant.
    ///
    /// Ordinary users must own the tenant; super users go through
    /// `can_access_tenant`.
    pub async fn ensure_tenant_access(&self, user: &User, tenant_id: Uuid) -> AppResult<()> {
        if user.role.is_super() {
            return self.check_access_predicate(user.id, tenant_id).await;
        }
        if user.tenant_id == Some(tenant_id) {
            Ok(())
        } else {
            Err(AppError::tenant_mismatch())
        }
    }

    /// Invoke `can_access_tenant`, mapping every non-answer to a failure.
    async fn check_access_predicate(&self, user_id: Uuid, tenant_id: Uuid) -> AppResult<()> {
        match self.authz_repo.can_access_tenant(user_id, tenant_id).await? {
            PredicateOutcome::Answer(true) => Ok(()),
            PredicateOutcome::Answer(false) => Err(AppError::tenant_access_denied(
                "Access to this tenant is not permitted",
            )),
            PredicateOutcome::NotInstalled => Err(AppError::authorization_check_failed(
                "can_access_tenant predicate is not installed",
            )),
        }
    }

    /// Switch a super user's session into another tenant, auditing the
    /// attempt whether it is allowed or denied.
    ///
    /// On success the session row is updated first and the audit entry
    /// follows; a failed audit write on that path surfaces to the
    /// caller. A denial is audited (best effort) before the error
    /// returns.
    pub async fn switch_tenant(
        &self,
        meta: &RequestMeta,
        user: &User,
        session: &Session,
        target_tenant_id: Uuid,
        reason: Option<&str>,
        sessions: &SessionStore,
    ) -> AppResult<Tenant> {
        if !user.role.is_super() {
            return Err(AppError::tenant_access_denied(
                "Only super users may switch tenants",
            ));
        }

        let tenant = match self.tenant_repo.find_active_by_id(target_tenant_id).await {
            Ok(Some(tenant)) => tenant,
            Ok(None) => {
                let err = AppError::not_found("Tenant not found");
                self.audit_switch(meta, user, session, Some(target_tenant_id), reason, None, &err)
                    .await;
                return Err(err);
            }
            Err(err) => {
                self.audit_switch(meta, user, session, Some(target_tenant_id), reason, None, &err)
                    .await;
                return Err(err);
            }
        };

        if let Err(err) = self.check_access_predicate(user.id, tenant.id).await {
            self.audit_switch(meta, user, session, Some(tenant.id), reason, None, &err)
                .await;
            return Err(err);
        }

        sessions.switch_active_tenant(session, tenant.id).await?;

        // Success-path audit must be visible: a failure here fails the call.
        self.audit_repo
            .create(&self.switch_entry(
                meta,
                user,
                session,
                Some(tenant.id),
                reason,
                Some(tenant.id),
                None,
            ))
            .await?;

        info!(
            user_id = %user.id,
            session_id = %session.id,
            from = %session.active_tenant_id,
            to = %tenant.id,
            "Super user switched active tenant"
        );

        Ok(tenant)
    }

    /// Decide whether the user may mutate a tenant's profile.
    ///
    /// Admins edit only their own tenant. Super users are gated by
    /// `can_edit_tenant`; if that predicate is structurally absent the
    /// edit is allowed. The fail-open path is scoped to this one
    /// predicate.
    pub async fn authorize_profile_edit(&self, user: &User, tenant_id: Uuid) -> AppResult<()> {
        match user.role {
            UserRole::Technician => Err(AppError::tenant_access_denied(
                "Insufficient role to edit tenant profiles",
            )),
            UserRole::Admin => {
                if user.tenant_id == Some(tenant_id) {
                    Ok(())
                } else {
                    Err(AppError::tenant_mismatch())
                }
            }
            UserRole::SuperUser => {
                match self.authz_repo.can_edit_tenant(user.id, tenant_id).await? {
                    PredicateOutcome::Answer(true) => Ok(()),
                    PredicateOutcome::Answer(false) => Err(AppError::tenant_access_denied(
                        "Editing this tenant is not permitted",
                    )),
                    PredicateOutcome::NotInstalled => {
                        warn!(
                            user_id = %user.id,
                            tenant_id = %tenant_id,
                            "can_edit_tenant predicate not installed; allowing edit for compatibility"
                        );
                        Ok(())
                    }
                }
            }
        }
    }

    /// Best-effort audit of a denied or failed switch attempt.
    async fn audit_switch(
        &self,
        meta: &RequestMeta,
        user: &User,
        session: &Session,
        target: Option<Uuid>,
        reason: Option<&str>,
        new_active: Option<Uuid>,
        err: &AppError,
    ) {
        let entry = self.switch_entry(meta, user, session, target, reason, new_active, Some(err));
        if let Err(audit_err) = self.audit_repo.create(&entry).await {
            error!(
                user_id = %user.id,
                error = %audit_err,
                "Failed to write audit entry for denied tenant switch"
            );
        }
    }

    fn switch_entry(
        &self,
        meta: &RequestMeta,
        user: &User,
        session: &Session,
        target: Option<Uuid>,
        reason: Option<&str>,
        new_active: Option<Uuid>,
        err: Option<&AppError>,
    ) -> CreateAuditLogEntry {
        let before = session.active_tenant_id;
        let after = new_active.unwrap_or(before);
        CreateAuditLogEntry {
            actor_user_id: user.id,
            actor_role: user.role,
            action: ACTION_TENANT_SWITCH.to_string(),
            target_tenant_id: target,
            request_path: meta.path.clone(),
            request_method: meta.method.clone(),
            ip_address: meta.ip_address.clone(),
            user_agent: meta.user_agent.clone(),
            reason: reason.map(String::from),
            before_state: Some(json!({ "active_tenant_id": before })),
            after_state: Some(json!({ "active_tenant_id": after })),
            success: err.is_none(),
            error_message: err.map(|e| e.message.clone()),
        }
    }
}
