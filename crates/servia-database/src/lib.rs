//! # servia-database
//!
//! PostgreSQL connection management and repository implementations for
//! Servia. One repository struct per table; every query is a bound sqlx
//! statement and every error is mapped into [`servia_core::AppError`].

pub mod connection;
pub mod migration;
pub mod repositories;
