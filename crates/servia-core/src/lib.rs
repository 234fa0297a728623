//! # servia-core
//!
//! Core crate for the Servia marketplace backend. Contains configuration
//! schemas, the unified error system, and the shared result alias.
//!
//! This crate has **no** internal dependencies on other Servia crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
