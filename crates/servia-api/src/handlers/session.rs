//! Session endpoint: validate, revoke, list tenants, switch tenant.
//!
//! A single POST route dispatching on the closed `action` discriminator.
//! The token may arrive as `Authorization: Bearer` or in the body; the
//! header wins when both are present.

use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use servia_auth::access::RequestMeta;
use servia_core::error::AppError;
use servia_core::result::AppResult;

use crate::dto::request::SessionActionRequest;
use crate::dto::response::{
    RevokeResponse, SwitchTenantResponse, TenantListResponse, TenantResponse, ValidateResponse,
};
use crate::error::ApiError;
use crate::extractors::{self, RequestHost};
use crate::state::AppState;

/// Reason recorded when a client revokes its own session.
const REVOKE_DEFAULT_REASON: &str = "logout";

/// POST /api/session
pub async fn session_action(
    State(state): State<AppState>,
    host: RequestHost,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    let req: SessionActionRequest = serde_json::from_value(body)?;

    match req {
        SessionActionRequest::Validate { token } => {
            let raw = required_token(&headers, token)?;
            let (session, user) = state.sessions.validate(&raw).await?;

            // An ordinary user presenting a token on another tenant's host
            // is answered with a mismatch, not that tenant's data.
            let resolved = state
                .resolver
                .resolve(host.forwarded_host.as_deref(), host.host.as_deref())
                .await?;
            if let Some(tenant) = &resolved.tenant {
                if !user.is_super() && user.tenant_id != Some(tenant.id) {
                    return Err(AppError::tenant_mismatch().into());
                }
            }

            // A super user's current tenant is re-checked against the
            // authorization predicate on every validation.
            if user.is_super() {
                state
                    .access
                    .ensure_tenant_access(&user, session.active_tenant_id)
                    .await?;
            }

            let tenant = state.tenant_repo.find_by_id(session.active_tenant_id).await?;

            Ok(Json(ValidateResponse {
                success: true,
                user: (&user).into(),
                session: (&session).into(),
                tenant: tenant.as_ref().map(TenantResponse::from),
                server_now: Utc::now(),
            })
            .into_response())
        }

        SessionActionRequest::Revoke { token, reason } => {
            let raw = required_token(&headers, token)?;
            state
                .sessions
                .revoke(&raw, reason.as_deref().unwrap_or(REVOKE_DEFAULT_REASON))
                .await?;

            Ok(Json(RevokeResponse {
                success: true,
                message: "Session revoked".to_string(),
                server_now: Utc::now(),
            })
            .into_response())
        }

        SessionActionRequest::ListTenants { token } => {
            let raw = required_token(&headers, token)?;
            let (_session, user) = state.sessions.validate(&raw).await?;

            let tenants = if user.is_super() {
                state.tenant_repo.list_active().await?
            } else {
                match user.tenant_id {
                    Some(id) => state
                        .tenant_repo
                        .find_active_by_id(id)
                        .await?
                        .into_iter()
                        .collect(),
                    None => Vec::new(),
                }
            };

            Ok(Json(TenantListResponse {
                success: true,
                tenants: tenants.iter().map(TenantResponse::from).collect(),
                server_now: Utc::now(),
            })
            .into_response())
        }

        SessionActionRequest::SwitchTenant {
            token,
            tenant_id,
            reason,
        } => {
            let raw = required_token(&headers, token)?;
            let (session, user) = state.sessions.validate(&raw).await?;

            let meta = RequestMeta {
                path: uri.path().to_string(),
                method: method.to_string(),
                ip_address: extractors::client_ip(&headers),
                user_agent: extractors::user_agent(&headers),
            };

            let tenant = state
                .access
                .switch_tenant(&meta, &user, &session, tenant_id, reason.as_deref(), &state.sessions)
                .await?;

            Ok(Json(SwitchTenantResponse {
                success: true,
                tenant: TenantResponse::from(&tenant),
                server_now: Utc::now(),
            })
            .into_response())
        }
    }
}

/// Header token wins over body token; absence is a malformed request.
fn required_token(headers: &HeaderMap, body_token: Option<String>) -> AppResult<String> {
    extractors::bearer_token(headers)
        .or(body_token)
        .ok_or_else(|| AppError::malformed_request("Missing session token"))
}
