//! # userdir-service
//!
//! Business logic for the user directory: account lifecycle, the listing
//! operation, and credential verification. Services orchestrate the
//! repository and auth layers; HTTP concerns stay in `userdir-api`.

pub mod auth;
pub mod context;
pub mod user;

pub use auth::AuthService;
pub use context::RequestContext;
pub use user::UserService;
