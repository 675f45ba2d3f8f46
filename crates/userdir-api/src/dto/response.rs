//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use userdir_core::types::ListMeta;
use userdir_entity::user::User;
use userdir_service::user::UserListing;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User summary for responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: String,
    /// Phone number.
    pub phone: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role.to_string(),
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}

/// Response for a newly created user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    /// The generated user ID.
    pub id: i64,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Access token expiration.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: UserResponse,
}

/// One page of users plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    /// The page rows.
    pub data: Vec<UserResponse>,
    /// Pagination metadata.
    pub meta: ListMeta,
}

impl From<UserListing> for UserListResponse {
    fn from(listing: UserListing) -> Self {
        Self {
            data: listing.users.into_iter().map(UserResponse::from).collect(),
            meta: listing.meta,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Service version.
    pub version: String,
}
