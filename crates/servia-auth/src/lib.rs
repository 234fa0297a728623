//! # servia-auth
//!
//! The authorization core: tenant resolution from request hosts,
//! credential verification, opaque bearer session lifecycle, and the
//! access controller that gates (and audits) cross-tenant activity.

pub mod access;
pub mod credentials;
pub mod resolver;
pub mod session;
pub mod token;
