//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Must be at least 32 bytes.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Email of the bootstrap admin account created on first start.
    #[serde(default = "default_admin_email")]
    pub bootstrap_admin_email: String,
    /// Initial password for the bootstrap admin account.
    #[serde(default = "default_admin_password")]
    pub bootstrap_admin_password: String,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION_32_BYTES!".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_password_min() -> usize {
    8
}

fn default_admin_email() -> String {
    "admin@admin.com".to_string()
}

fn default_admin_password() -> String {
    "password".to_string()
}
