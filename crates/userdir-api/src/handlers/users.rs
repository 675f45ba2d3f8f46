//! User management handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use userdir_core::error::AppError;
use userdir_core::types::RawListParams;
use userdir_entity::user::{UpdateUser, UserRole, USER_SORT_FIELDS};
use userdir_service::user::RegisterUser;

use crate::dto::request::{validate_body, ChangeRoleRequest, RegisterRequest, UpdateUserRequest};
use crate::dto::response::{ApiResponse, CreateUserResponse, UserListResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/v1/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CreateUserResponse>>)> {
    validate_body(&req)?;

    let id = state
        .user_service
        .register(
            RegisterUser {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                password: req.password,
                phone: req.phone,
            },
            state.request_timeout(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CreateUserResponse { id })),
    ))
}

/// GET /api/v1/users
///
/// Raw query parameters are parsed and validated against the user sort
/// allow-list before anything reaches the store; a failure here means no
/// query is ever built.
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(raw): Query<RawListParams>,
) -> ApiResult<Json<ApiResponse<UserListResponse>>> {
    let params = raw.parse(&USER_SORT_FIELDS).map_err(AppError::from)?;

    let listing = state
        .user_service
        .list(&params, state.request_timeout())
        .await?;

    Ok(Json(ApiResponse::ok(UserListResponse::from(listing))))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get(id, state.request_timeout()).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    validate_body(&req)?;

    let user = state
        .user_service
        .update(
            id,
            UpdateUser {
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
                phone: req.phone,
            },
            state.request_timeout(),
        )
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .delete(id, state.request_timeout())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/users/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<ChangeRoleRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    require_admin(&auth)?;
    let role: UserRole = req.role.parse()?;

    let user = state
        .user_service
        .set_role(id, role, state.request_timeout())
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
