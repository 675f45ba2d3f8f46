//! User repository implementation.
//!
//! Every method takes an explicit operation deadline; a single deadline
//! bounds the whole count-plus-fetch pair in [`UserRepository::list`].

use std::time::Duration;

use sqlx::PgPool;
use tokio::time::Instant;

use userdir_core::error::{AppError, ErrorKind};
use userdir_core::types::ListParams;
use userdir_core::AppResult;
use userdir_entity::user::{NewUser, UpdateUser, User, UserRole};

use crate::query::UserListQuery;
use crate::repositories::run_until;

/// Name of the unique constraint guarding the email column.
const CNT_USER_EMAIL: &str = "users_email_key";

/// One page of users plus the unpaginated total.
///
/// Invariant: `users.len() <= limit` and `users.len() <= total`; the total
/// is computed against the same predicate as the rows.
#[derive(Debug, Clone)]
pub struct UserListResult {
    /// The page-bounded, sorted rows.
    pub users: Vec<User>,
    /// Rows matching the filter predicate ignoring pagination.
    pub total: i64,
}

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user and return its generated id.
    pub async fn create(&self, user: &NewUser, timeout: Duration) -> AppResult<i64> {
        let fut = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (first_name, last_name, email, password_hash, role, phone) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.phone)
        .fetch_one(&self.pool);

        run_until("create user", Instant::now() + timeout, fut)
            .await
            .map_err(|err| match err.kind {
                ErrorKind::UniqueViolation if err.message.contains(CNT_USER_EMAIL) => {
                    AppError::new(
                        ErrorKind::UniqueViolation,
                        format!("Email '{}' is already in use", user.email),
                    )
                }
                _ => err,
            })
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: i64, timeout: Duration) -> AppResult<Option<User>> {
        let fut = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool);

        run_until("find user by id", Instant::now() + timeout, fut).await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str, timeout: Duration) -> AppResult<Option<User>> {
        let fut = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool);

        run_until("find user by email", Instant::now() + timeout, fut).await
    }

    /// Find any admin account.
    pub async fn find_admin(&self, timeout: Duration) -> AppResult<Option<User>> {
        let fut = sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = 'admin' LIMIT 1")
            .fetch_optional(&self.pool);

        run_until("find admin", Instant::now() + timeout, fut).await
    }

    /// List users matching the validated parameters.
    ///
    /// Executes the count query and then the fetch query compiled from the
    /// same predicate, both under one deadline. Partial failure (count
    /// succeeds, fetch fails) surfaces as a single classified error; no
    /// half-populated result is returned. No retries are attempted here.
    pub async fn list(&self, params: &ListParams, timeout: Duration) -> AppResult<UserListResult> {
        let query = UserListQuery::new(params);
        let deadline = Instant::now() + timeout;

        let count_sql = query.count_sql();
        let mut count = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(pattern) = query.pattern() {
            count = count.bind(pattern);
        }
        let total: i64 = run_until("count users", deadline, count.fetch_one(&self.pool)).await?;

        let fetch_sql = query.fetch_sql();
        let mut fetch = sqlx::query_as::<_, User>(&fetch_sql);
        if let Some(pattern) = query.pattern() {
            fetch = fetch.bind(pattern);
        }
        let users = run_until(
            "fetch users",
            deadline,
            fetch
                .bind(query.limit())
                .bind(query.offset())
                .fetch_all(&self.pool),
        )
        .await?;

        Ok(UserListResult { users, total })
    }

    /// Update a user's profile fields, leaving `None` fields unchanged.
    pub async fn update(
        &self,
        id: i64,
        changes: &UpdateUser,
        timeout: Duration,
    ) -> AppResult<User> {
        let fut = sqlx::query_as::<_, User>(
            "UPDATE users SET first_name = COALESCE($2, first_name), \
                              last_name = COALESCE($3, last_name), \
                              email = COALESCE($4, email), \
                              phone = COALESCE($5, phone), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .fetch_optional(&self.pool);

        run_until("update user", Instant::now() + timeout, fut)
            .await
            .map_err(|err| match err.kind {
                ErrorKind::UniqueViolation if err.message.contains(CNT_USER_EMAIL) => {
                    AppError::new(ErrorKind::UniqueViolation, "Email is already in use")
                }
                _ => err,
            })?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Update a user's role.
    pub async fn set_role(&self, id: i64, role: UserRole, timeout: Duration) -> AppResult<User> {
        let fut = sqlx::query_as::<_, User>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool);

        run_until("set user role", Instant::now() + timeout, fut)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Delete a user by id.
    pub async fn delete(&self, id: i64, timeout: Duration) -> AppResult<()> {
        let fut = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = run_until("delete user", Instant::now() + timeout, fut).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        Ok(())
    }
}
