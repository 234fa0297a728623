//! Technical report handlers.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::dto::response::ClientLinkResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/technical-reports/{report_id}/client-link
pub async fn client_link(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
    auth: AuthUser,
) -> Result<Json<ClientLinkResponse>, ApiError> {
    let client_token = state.report_links.client_link(&auth.ctx, report_id).await?;

    Ok(Json(ClientLinkResponse {
        success: true,
        client_token,
    }))
}
