//! HTTP middleware: CORS, request logging, and role gates.

pub mod cors;
pub mod logging;
pub mod rbac;
