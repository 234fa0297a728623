//! `RequestHost` extractor carrying the host headers the client addressed.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Raw host header values, as fed to the tenant resolver.
///
/// `x-forwarded-host` is captured alongside `host`; normalization and
/// precedence live in the resolver.
#[derive(Debug, Clone, Default)]
pub struct RequestHost {
    /// The `x-forwarded-host` header, if present.
    pub forwarded_host: Option<String>,
    /// The `host` header, if present.
    pub host: Option<String>,
}

impl<S> FromRequestParts<S> for RequestHost
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded_host = parts
            .headers
            .get("x-forwarded-host")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let host = parts
            .headers
            .get("host")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(RequestHost {
            forwarded_host,
            host,
        })
    }
}
