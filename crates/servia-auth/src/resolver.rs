//! Tenant resolution from request hosts.
//!
//! Derives a normalized host and subdomain from request headers, then
//! resolves a tenant via the directory: a custom-domain match wins over
//! a subdomain match; `www` never resolves. Side-effect-free: at most
//! two point lookups per call, and lookup errors propagate (fail closed).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use servia_core::result::AppResult;
use servia_database::repositories::tenant::TenantRepository;
use servia_entity::tenant::Tenant;

/// How a tenant was resolved for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Matched a custom-domain row.
    Domain,
    /// Matched the tenant's subdomain or slug.
    Subdomain,
}

/// Outcome of tenant resolution for one request.
#[derive(Debug, Clone)]
pub struct ResolvedTenant {
    /// Normalized host the request arrived on.
    pub host: Option<String>,
    /// Subdomain label extracted from the host.
    pub subdomain: Option<String>,
    /// The resolved tenant, if any.
    pub tenant: Option<Tenant>,
    /// Which rule produced the match.
    pub source: Option<ResolutionSource>,
}

/// Normalize the request host: forwarded host preferred, lowercased,
/// port stripped. Empty or unusable values become `None`.
pub fn extract_host(forwarded_host: Option<&str>, host_header: Option<&str>) -> Option<String> {
    let raw = forwarded_host
        .filter(|h| !h.trim().is_empty())
        .or(host_header)?;
    // A forwarded header may carry a comma-separated chain.
    let first = raw.split(',').next().unwrap_or(raw).trim();
    if first.is_empty() {
        return None;
    }
    let lowered = first.to_ascii_lowercase();
    let without_port = lowered.split(':').next().unwrap_or(&lowered);
    if without_port.is_empty() {
        None
    } else {
        Some(without_port.to_string())
    }
}

/// Extract the subdomain label from a normalized host.
///
/// `localhost` variants accept a subdomain with only two labels
/// (`acme.localhost`); real hosts need at least three
/// (`acme.example.com`). Bare domains yield `None`.
pub fn extract_subdomain(host: &str) -> Option<String> {
    let labels: Vec<&str> = host.split('.').collect();
    let is_loopback = host == "localhost" || host.ends_with(".localhost");

    let min_labels = if is_loopback { 2 } else { 3 };
    if labels.len() < min_labels {
        return None;
    }
    let first = labels[0];
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// Resolves the tenant a request belongs to.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    tenant_repo: Arc<TenantRepository>,
}

impl TenantResolver {
    /// Creates a new tenant resolver.
    pub fn new(tenant_repo: Arc<TenantRepository>) -> Self {
        Self { tenant_repo }
    }

    /// Resolve a tenant from raw header values.
    ///
    /// Resolution order, first match wins:
    /// 1. custom-domain row for the literal host (domain and tenant active)
    /// 2. active tenant whose subdomain or slug equals the extracted
    ///    label, unless the label is `www`
    pub async fn resolve(
        &self,
        forwarded_host: Option<&str>,
        host_header: Option<&str>,
    ) -> AppResult<ResolvedTenant> {
        let host = extract_host(forwarded_host, host_header);
        let subdomain = host.as_deref().and_then(extract_subdomain);

        let Some(host_str) = host.as_deref() else {
            return Ok(ResolvedTenant {
                host,
                subdomain,
                tenant: None,
                source: None,
            });
        };

        if let Some(tenant) = self.tenant_repo.find_active_by_domain(host_str).await? {
            debug!(host = host_str, tenant_id = %tenant.id, "Tenant resolved by custom domain");
            return Ok(ResolvedTenant {
                host,
                subdomain,
                tenant: Some(tenant),
                source: Some(ResolutionSource::Domain),
            });
        }

        if let Some(label) = subdomain.as_deref() {
            if label != "www" {
                if let Some(tenant) = self
                    .tenant_repo
                    .find_active_by_subdomain_or_slug(label)
                    .await?
                {
                    debug!(subdomain = label, tenant_id = %tenant.id, "Tenant resolved by subdomain");
                    return Ok(ResolvedTenant {
                        host,
                        subdomain,
                        tenant: Some(tenant),
                        source: Some(ResolutionSource::Subdomain),
                    });
                }
            }
        }

        Ok(ResolvedTenant {
            host,
            subdomain,
            tenant: None,
            source: None,
        })
    }
}
