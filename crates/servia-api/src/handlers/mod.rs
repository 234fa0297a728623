//! HTTP request handlers.

pub mod auth;
pub mod health;
pub mod report;
pub mod session;
pub mod tenant;
