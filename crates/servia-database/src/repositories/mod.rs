//! Repository implementations, one per table.

pub mod audit;
pub mod authz;
pub mod report;
pub mod session;
pub mod tenant;
pub mod user;
