//! Health check handler.

use axum::extract::State;
use axum::Json;

use servia_database::connection::health_check;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match health_check(&state.db_pool).await {
        Ok(true) => "connected",
        _ => "unreachable",
    };

    Json(HealthResponse {
        success: true,
        status: "ok".to_string(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
