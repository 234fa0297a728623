//! # servia-service
//!
//! Business logic service layer for Servia. Each service orchestrates
//! repositories and access control to implement application-level use
//! cases.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod report;
pub mod tenant;

pub use context::RequestContext;
pub use report::ReportLinkService;
pub use tenant::TenantProfileService;
