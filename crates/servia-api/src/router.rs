//! Route definitions for the Servia HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router() -> Router<AppState> {
    let api_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/session", post(handlers::session::session_action))
        .route("/tenants", post(handlers::tenant::tenant_action))
        .route(
            "/technical-reports/{report_id}/client-link",
            post(handlers::report::client_link),
        )
        .route("/health", get(handlers::health::health));

    Router::new().nest("/api", api_routes)
}
