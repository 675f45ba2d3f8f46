//! # userdir-entity
//!
//! Domain entity models for the user directory service. Every struct in
//! this crate represents a database table row or a domain value object.
//! Database entities derive `sqlx::FromRow`.

pub mod user;
