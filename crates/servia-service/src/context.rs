//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use servia_entity::session::Session;
use servia_entity::user::User;

/// Context for the current authenticated request.
///
/// Built by the authentication extractor and passed into service
/// methods so that every operation knows *who* is acting and from
/// *which* session.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user.
    pub user: User,
    /// The session the bearer token resolved to.
    pub session: Session,
    /// Request path, for audit entries.
    pub path: String,
    /// Request method, for audit entries.
    pub method: String,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user: User,
        session: Session,
        path: String,
        method: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user,
            session,
            path,
            method,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// The tenant the session is currently scoped to.
    pub fn active_tenant_id(&self) -> Uuid {
        self.session.active_tenant_id
    }
}
