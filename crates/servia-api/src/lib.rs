//! # servia-api
//!
//! HTTP API layer for Servia built on Axum.
//!
//! Provides the REST endpoints, extractors, DTOs, and the mapping from
//! domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
