//! User account lifecycle and listing.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use userdir_auth::PasswordHasher;
use userdir_core::error::AppError;
use userdir_core::types::{ListMeta, ListParams};
use userdir_core::AppResult;
use userdir_database::repositories::UserRepository;
use userdir_entity::user::{NewUser, UpdateUser, User, UserRole};

/// Data for registering a new user, with the password still in plaintext.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before it reaches the store.
    pub password: String,
    /// Contact phone number.
    pub phone: String,
}

/// One page of users together with pagination metadata.
#[derive(Debug, Clone)]
pub struct UserListing {
    /// The page-bounded, sorted rows.
    pub users: Vec<User>,
    /// Derived pagination metadata.
    pub meta: ListMeta,
}

/// Handles user account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repo: Arc<UserRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Registers a new user with the `user` role.
    pub async fn register(&self, req: RegisterUser, timeout: Duration) -> AppResult<i64> {
        let password_hash = self.hasher.hash_password(&req.password)?;

        let id = self
            .repo
            .create(
                &NewUser {
                    first_name: req.first_name,
                    last_name: req.last_name,
                    email: req.email,
                    password_hash,
                    role: UserRole::User,
                    phone: req.phone,
                },
                timeout,
            )
            .await?;

        info!(user_id = id, "Registered user");
        Ok(id)
    }

    /// Fetches a single user by id.
    pub async fn get(&self, id: i64, timeout: Duration) -> AppResult<User> {
        self.repo
            .find_by_id(id, timeout)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Lists users for validated parameters.
    ///
    /// The repository runs the count and fetch queries against one
    /// predicate; the metadata echoes the request's pagination plus the
    /// freshly observed total.
    pub async fn list(&self, params: &ListParams, timeout: Duration) -> AppResult<UserListing> {
        let result = self.repo.list(params, timeout).await?;

        Ok(UserListing {
            meta: ListMeta::new(params, result.total),
            users: result.users,
        })
    }

    /// Updates a user's profile fields.
    pub async fn update(
        &self,
        id: i64,
        changes: UpdateUser,
        timeout: Duration,
    ) -> AppResult<User> {
        let user = self.repo.update(id, &changes, timeout).await?;
        info!(user_id = id, "Updated user");
        Ok(user)
    }

    /// Deletes a user.
    pub async fn delete(&self, id: i64, timeout: Duration) -> AppResult<()> {
        self.repo.delete(id, timeout).await?;
        info!(user_id = id, "Deleted user");
        Ok(())
    }

    /// Changes a user's role.
    pub async fn set_role(&self, id: i64, role: UserRole, timeout: Duration) -> AppResult<User> {
        let user = self.repo.set_role(id, role, timeout).await?;
        info!(user_id = id, role = %role, "Changed user role");
        Ok(user)
    }

    /// Ensures an admin account exists, creating the bootstrap admin on
    /// first start.
    pub async fn ensure_admin(
        &self,
        email: &str,
        password: &str,
        timeout: Duration,
    ) -> AppResult<()> {
        if let Some(admin) = self.repo.find_admin(timeout).await? {
            info!(user_id = admin.id, "Admin account present");
            return Ok(());
        }

        let password_hash = self.hasher.hash_password(password)?;
        let id = self
            .repo
            .create(
                &NewUser {
                    first_name: "Admin".to_string(),
                    last_name: "Admin".to_string(),
                    email: email.to_string(),
                    password_hash,
                    role: UserRole::Admin,
                    phone: String::new(),
                },
                timeout,
            )
            .await?;

        info!(user_id = id, "Created bootstrap admin account");
        Ok(())
    }
}
