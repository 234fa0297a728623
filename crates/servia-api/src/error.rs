//! Maps domain `AppError` to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use servia_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// `AppError` carried across the HTTP boundary.
///
/// Handlers return this so `?` converts domain errors straight into
/// responses.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self(AppError::from(err))
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MalformedRequest | ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidCredentials
        | ErrorKind::SessionNotFound
        | ErrorKind::SessionExpired
        | ErrorKind::SessionRevoked => StatusCode::UNAUTHORIZED,
        ErrorKind::TenantUnresolved | ErrorKind::TenantMismatch | ErrorKind::TenantAccessDenied => {
            StatusCode::FORBIDDEN
        }
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Misconfigured
        | ErrorKind::AuthorizationCheckFailed
        | ErrorKind::Database
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        // Server-side faults are logged in full but surfaced generically.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = %err.kind, error = %err, "Request failed");
            "An internal error occurred".to_string()
        } else {
            err.message.clone()
        };

        let body = ApiErrorResponse {
            success: false,
            error: err.kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
