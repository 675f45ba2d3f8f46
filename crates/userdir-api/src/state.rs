//! Shared application state threaded through every handler.

use std::sync::Arc;
use std::time::Duration;

use userdir_auth::JwtVerifier;
use userdir_core::config::AppConfig;
use userdir_database::DatabasePool;
use userdir_service::{AuthService, UserService};

/// State available to all handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool (health checks).
    pub db: DatabasePool,
    /// Bearer-token verifier.
    pub jwt_verifier: Arc<JwtVerifier>,
    /// User account operations.
    pub user_service: Arc<UserService>,
    /// Login and token issuance.
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// The operation deadline applied to store-facing work for one request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.server.request_timeout_seconds)
    }
}
