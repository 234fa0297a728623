//! Unified application error types for Servia.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Reason string recorded on sessions superseded by a newer login.
///
/// Shared between the session store (which writes it) and validation
/// (which turns it into a friendlier client message).
pub const REVOKED_NEW_LOGIN: &str = "new login";

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Required configuration is missing or invalid.
    Misconfigured,
    /// The request body was unparsable or missing a required field.
    MalformedRequest,
    /// Email/password verification failed.
    InvalidCredentials,
    /// No session matches the presented token.
    SessionNotFound,
    /// The session's expiry has passed.
    SessionExpired,
    /// The session was revoked (logout, superseding login, ...).
    SessionRevoked,
    /// No tenant could be resolved for the request.
    TenantUnresolved,
    /// The caller's tenant does not match the resolved tenant.
    TenantMismatch,
    /// A super user was denied access to the target tenant.
    TenantAccessDenied,
    /// Input validation failed (field-scoped).
    Validation,
    /// The requested resource was not found.
    NotFound,
    /// The external authorization predicate itself errored.
    AuthorizationCheckFailed,
    /// A database error occurred.
    Database,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misconfigured => write!(f, "MISCONFIGURED"),
            Self::MalformedRequest => write!(f, "MALFORMED_REQUEST"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::SessionNotFound => write!(f, "SESSION_NOT_FOUND"),
            Self::SessionExpired => write!(f, "SESSION_EXPIRED"),
            Self::SessionRevoked => write!(f, "SESSION_REVOKED"),
            Self::TenantUnresolved => write!(f, "TENANT_UNRESOLVED"),
            Self::TenantMismatch => write!(f, "TENANT_MISMATCH"),
            Self::TenantAccessDenied => write!(f, "TENANT_ACCESS_DENIED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::AuthorizationCheckFailed => write!(f, "AUTHORIZATION_CHECK_FAILED"),
            Self::Database => write!(f, "DATABASE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Servia.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a misconfiguration error.
    pub fn misconfigured(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Misconfigured, message)
    }

    /// Create a malformed-request error.
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedRequest, message)
    }

    /// Create an invalid-credentials error with the standard client message.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid email or password")
    }

    /// Create a session-not-found error.
    pub fn session_not_found() -> Self {
        Self::new(ErrorKind::SessionNotFound, "Session not found")
    }

    /// Create a session-expired error.
    pub fn session_expired() -> Self {
        Self::new(ErrorKind::SessionExpired, "Session has expired")
    }

    /// Create a session-revoked error from the stored revocation reason.
    ///
    /// A session superseded by a newer login gets a distinct, friendlier
    /// message than a generic revocation.
    pub fn session_revoked(reason: Option<&str>) -> Self {
        let message = match reason {
            Some(REVOKED_NEW_LOGIN) => {
                "Session was signed out by a new login elsewhere".to_string()
            }
            _ => "Session has been revoked".to_string(),
        };
        Self::new(ErrorKind::SessionRevoked, message)
    }

    /// Create a tenant-unresolved error.
    pub fn tenant_unresolved() -> Self {
        Self::new(
            ErrorKind::TenantUnresolved,
            "No tenant could be resolved for this request",
        )
    }

    /// Create a tenant-mismatch error.
    pub fn tenant_mismatch() -> Self {
        Self::new(
            ErrorKind::TenantMismatch,
            "Account does not belong to this tenant",
        )
    }

    /// Create a tenant-access-denied error.
    pub fn tenant_access_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TenantAccessDenied, message)
    }

    /// Create a field-scoped validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authorization-check-failed error.
    pub fn authorization_check_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthorizationCheckFailed, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::MalformedRequest,
            format!("JSON error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Misconfigured,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
