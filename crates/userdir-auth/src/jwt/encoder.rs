//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use userdir_core::config::auth::AuthConfig;
use userdir_core::error::AppError;
use userdir_entity::user::User;

use super::claims::Claims;
use crate::token::generate_token_id;

/// Shortest secret accepted for HMAC signing, in bytes.
const MIN_SECRET_BYTES: usize = 32;

/// Creates signed JWT access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

/// A freshly issued access token and its expiry.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The signed access token.
    pub access_token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Rejects secrets shorter than 32 bytes so a weak key fails fast at
    /// startup rather than at the first login.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret.len() < MIN_SECRET_BYTES {
            return Err(AppError::configuration(format!(
                "jwt_secret must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.jwt_access_ttl_minutes as i64,
        })
    }

    /// Issues an access token for the given user.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::minutes(self.access_ttl_minutes);

        let claims = Claims {
            sub: user.id,
            role: user.role,
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: generate_token_id(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }
}
