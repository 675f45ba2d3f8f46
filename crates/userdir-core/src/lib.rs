//! # userdir-core
//!
//! Core crate for the user directory service. Contains configuration
//! schemas, the list-query types (parameters, sorting allow-lists,
//! pagination metadata), and the unified error system.
//!
//! This crate has **no** internal dependencies on other userdir crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
