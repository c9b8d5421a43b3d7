use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::require_session_user;
use super::{ApiError, ApiResponse, AppState, UserDto};
use crate::services::CreateUserRequest;

/// POST /admin/users
/// Create a user with an explicit permission template (requires `user_add_new`)
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let actor = require_session_user(&session).await?;

    let user = state.user_admin_service().create_user(actor, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}
