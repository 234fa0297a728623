//! Tenant endpoint: profile reads and updates.
//!
//! Like `/session`, the token may arrive as `Authorization: Bearer` or
//! in the body; the header wins when both are present.

use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::Json;

use servia_core::error::AppError;
use servia_service::context::RequestContext;

use crate::dto::request::TenantActionRequest;
use crate::dto::response::{TenantProfileResponse, TenantResponse};
use crate::error::ApiError;
use crate::extractors;
use crate::state::AppState;

/// POST /api/tenants
///
/// Requires an Admin or SuperUser session; technicians are denied
/// before any action dispatch.
pub async fn tenant_action(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<TenantProfileResponse>, ApiError> {
    let req: TenantActionRequest = serde_json::from_value(body)?;

    let body_token = match &req {
        TenantActionRequest::GetProfile { token, .. } => token.clone(),
        TenantActionRequest::UpdateProfile { token, .. } => token.clone(),
    };
    let raw = extractors::bearer_token(&headers)
        .or(body_token)
        .ok_or_else(|| AppError::malformed_request("Missing session token"))?;

    let (session, user) = state.sessions.validate(&raw).await?;

    if !user.role.can_manage_tenant() {
        return Err(AppError::tenant_access_denied(
            "Insufficient role for tenant management",
        )
        .into());
    }

    let ctx = RequestContext::new(
        user,
        session,
        uri.path().to_string(),
        method.to_string(),
        extractors::client_ip(&headers),
        extractors::user_agent(&headers),
    );

    let tenant = match req {
        TenantActionRequest::GetProfile { tenant_id, .. } => {
            let id = tenant_id.unwrap_or(ctx.active_tenant_id());
            state.profile_service.get_profile(&ctx, id).await?
        }
        TenantActionRequest::UpdateProfile {
            tenant_id, data, ..
        } => {
            let id = tenant_id.unwrap_or(ctx.active_tenant_id());
            state.profile_service.update_profile(&ctx, id, data).await?
        }
    };

    Ok(Json(TenantProfileResponse {
        success: true,
        tenant: TenantResponse::from(&tenant),
    }))
}
