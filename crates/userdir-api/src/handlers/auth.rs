//! Authentication handlers.

use axum::extract::State;
use axum::Json;

use crate::dto::request::{validate_body, LoginRequest};
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    validate_body(&req)?;

    let outcome = state
        .auth_service
        .login(&req.email, &req.password, state.request_timeout())
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: outcome.token.access_token,
        expires_at: outcome.token.expires_at,
        user: UserResponse::from(outcome.user),
    })))
}
