//! Credential verification and token issuance.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use userdir_auth::jwt::encoder::IssuedToken;
use userdir_auth::{JwtEncoder, PasswordHasher};
use userdir_core::error::AppError;
use userdir_core::AppResult;
use userdir_database::repositories::UserRepository;
use userdir_entity::user::User;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The issued access token.
    pub token: IssuedToken,
    /// The authenticated user.
    pub user: User,
}

/// Verifies credentials and issues access tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            repo,
            hasher,
            encoder,
        }
    }

    /// Verifies the credentials and issues an access token.
    ///
    /// A missing user and a wrong password produce the same message so the
    /// endpoint does not leak which emails are registered.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        timeout: Duration,
    ) -> AppResult<LoginOutcome> {
        let Some(user) = self.repo.find_by_email(email, timeout).await? else {
            warn!(email, "Login attempt for unknown email");
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let token = self.encoder.issue(&user)?;
        info!(user_id = user.id, "Issued access token");

        Ok(LoginOutcome { token, user })
    }
}
