//! Technical report services.

mod link;

pub use link::ReportLinkService;
