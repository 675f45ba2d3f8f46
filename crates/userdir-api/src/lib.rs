//! # userdir-api
//!
//! HTTP API layer for the user directory built on Axum.
//!
//! Provides the REST endpoints, the bearer-token extractor, middleware
//! (CORS, request logging), DTOs, and the error-to-status mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
