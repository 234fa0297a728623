//! `AuthUser` extractor: validates the bearer session token and injects
//! the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use servia_core::error::AppError;
use servia_service::context::RequestContext;

use crate::error::ApiError;
use crate::extractors;
use crate::state::AppState;

/// Extracted authenticated request context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The request context.
    pub ctx: RequestContext,
    /// The raw bearer token the context was validated from.
    pub token: String,
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.ctx
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extractors::bearer_token(&parts.headers)
            .ok_or_else(|| AppError::malformed_request("Missing bearer session token"))?;

        let (session, user) = state.sessions.validate(&token).await?;

        let ctx = RequestContext::new(
            user,
            session,
            parts.uri.path().to_string(),
            parts.method.to_string(),
            extractors::client_ip(&parts.headers),
            extractors::user_agent(&parts.headers),
        );

        Ok(AuthUser { ctx, token })
    }
}
