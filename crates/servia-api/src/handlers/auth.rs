//! Login handler: resolves the tenant, verifies credentials and issues a
//! session.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::{info, warn};
use validator::Validate;

use servia_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{IssuedTokenResponse, LoginResponse, TenantResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{self, RequestHost};
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    host: RequestHost,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<LoginResponse>, ApiError> {
    let req: LoginRequest = serde_json::from_value(body)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let resolved = state
        .resolver
        .resolve(host.forwarded_host.as_deref(), host.host.as_deref())
        .await?;

    let email = req.email.trim().to_lowercase();
    let user = state
        .user_repo
        .find_by_email(&email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !user.can_login() {
        warn!(user_id = %user.id, "Login rejected: account is not active");
        return Err(AppError::invalid_credentials().into());
    }

    if !state.credentials.verify(&req.password, &user) {
        warn!(user_id = %user.id, "Login rejected: credential mismatch");
        return Err(AppError::invalid_credentials().into());
    }

    let tenant = state
        .access
        .authorize_tenant(&user, resolved.tenant.as_ref())
        .await?;

    let issued = state
        .sessions
        .create(
            &user,
            tenant.id,
            extractors::user_agent(&headers).as_deref(),
        )
        .await?;

    info!(
        user_id = %user.id,
        tenant_id = %tenant.id,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        success: true,
        user: UserResponse::from(&user),
        session: IssuedTokenResponse {
            token: issued.token,
            expires_at: issued.session.expires_at,
        },
        tenant: TenantResponse::from(&tenant),
    }))
}
