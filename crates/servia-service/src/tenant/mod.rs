//! Tenant profile services.

mod profile;
mod validate;

pub use profile::TenantProfileService;
