//! Application builder: wires repositories, services, router, and
//! middleware into an Axum app.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use servia_auth::access::AccessController;
use servia_auth::credentials::CredentialVerifier;
use servia_auth::resolver::TenantResolver;
use servia_auth::session::SessionStore;
use servia_core::config::AppConfig;
use servia_core::error::AppError;
use servia_core::result::AppResult;
use servia_database::repositories::audit::AuditLogRepository;
use servia_database::repositories::authz::AuthzRepository;
use servia_database::repositories::report::ReportRepository;
use servia_database::repositories::session::SessionRepository;
use servia_database::repositories::tenant::TenantRepository;
use servia_database::repositories::user::UserRepository;
use servia_service::{ReportLinkService, TenantProfileService};

use crate::router::build_router;
use crate::state::AppState;

/// Construct every repository and service and assemble the shared state.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    // ── Repositories ─────────────────────────────────────────────
    let tenant_repo = Arc::new(TenantRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(db_pool.clone()));
    let audit_repo = Arc::new(AuditLogRepository::new(db_pool.clone()));
    let authz_repo = Arc::new(AuthzRepository::new(db_pool.clone()));
    let report_repo = Arc::new(ReportRepository::new(db_pool.clone()));

    // ── Auth components ──────────────────────────────────────────
    let resolver = Arc::new(TenantResolver::new(Arc::clone(&tenant_repo)));
    let credentials = Arc::new(CredentialVerifier::new());
    let sessions = Arc::new(SessionStore::new(
        Arc::clone(&session_repo),
        Arc::clone(&user_repo),
        config.session.clone(),
    ));
    let access = Arc::new(AccessController::new(
        Arc::clone(&tenant_repo),
        Arc::clone(&authz_repo),
        Arc::clone(&audit_repo),
    ));

    // ── Services ─────────────────────────────────────────────────
    let profile_service = Arc::new(TenantProfileService::new(
        Arc::clone(&tenant_repo),
        Arc::clone(&access),
    ));
    let report_links = Arc::new(ReportLinkService::new(
        Arc::clone(&report_repo),
        Arc::clone(&access),
    ));

    AppState {
        config: Arc::new(config),
        db_pool,
        tenant_repo,
        user_repo,
        audit_repo,
        resolver,
        credentials,
        sessions,
        access,
        profile_service,
        report_links,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the Servia server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> AppResult<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, db_pool);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Servia server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
