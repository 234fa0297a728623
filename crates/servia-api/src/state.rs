//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use servia_auth::access::AccessController;
use servia_auth::credentials::CredentialVerifier;
use servia_auth::resolver::TenantResolver;
use servia_auth::session::SessionStore;
use servia_core::config::AppConfig;
use servia_database::repositories::audit::AuditLogRepository;
use servia_database::repositories::tenant::TenantRepository;
use servia_database::repositories::user::UserRepository;
use servia_service::{ReportLinkService, TenantProfileService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    /// Tenant repository
    pub tenant_repo: Arc<TenantRepository>,
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Audit log repository
    pub audit_repo: Arc<AuditLogRepository>,

    /// Host-based tenant resolution
    pub resolver: Arc<TenantResolver>,
    /// Credential verification
    pub credentials: Arc<CredentialVerifier>,
    /// Session lifecycle
    pub sessions: Arc<SessionStore>,
    /// Cross-tenant access control
    pub access: Arc<AccessController>,

    /// Tenant profile service
    pub profile_service: Arc<TenantProfileService>,
    /// Technical report client links
    pub report_links: Arc<ReportLinkService>,
}
