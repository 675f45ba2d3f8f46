//! JWT token verification.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use userdir_core::config::auth::AuthConfig;
use userdir_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens presented by the HTTP layer.
#[derive(Clone)]
pub struct JwtVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock-skew tolerance

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token, checking signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(format!("Invalid access token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use userdir_core::config::auth::AuthConfig;
    use userdir_entity::user::{User, UserRole};

    use crate::jwt::encoder::JwtEncoder;

    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret-0123456789abcdefgh".to_string(),
            jwt_access_ttl_minutes: 15,
            password_min_length: 8,
            bootstrap_admin_email: "admin@admin.com".to_string(),
            bootstrap_admin_password: "password".to_string(),
        }
    }

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: 42,
            first_name: "Ryan".to_string(),
            last_name: "Smith".to_string(),
            email: "ryan@example.com".to_string(),
            password_hash: String::new(),
            role: UserRole::User,
            phone: "5550100".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let config = test_config();
        let encoder = JwtEncoder::new(&config).unwrap();
        let verifier = JwtVerifier::new(&config);

        let issued = encoder.issue(&test_user()).unwrap();
        let claims = verifier.verify(&issued.access_token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, UserRole::User);
        assert_eq!(claims.email, "ryan@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&test_config()).unwrap();
        let issued = encoder.issue(&test_user()).unwrap();

        let other = AuthConfig {
            jwt_secret: "a-completely-different-secret-key-00".to_string(),
            ..test_config()
        };
        assert!(JwtVerifier::new(&other)
            .verify(&issued.access_token)
            .is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let verifier = JwtVerifier::new(&test_config());
        assert!(verifier.verify("not.a.token").is_err());
    }

    #[test]
    fn test_short_secret_rejected_at_construction() {
        let config = AuthConfig {
            jwt_secret: "too-short".to_string(),
            ..test_config()
        };
        assert!(JwtEncoder::new(&config).is_err());
    }
}
