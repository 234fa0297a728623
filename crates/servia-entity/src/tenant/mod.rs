pub mod model;
pub mod status;

pub use model::{Tenant, TenantProfilePatch};
pub use status::TenantStatus;
