use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState};
use crate::constants::session::USER_ID_KEY;
use crate::domain::UserId;
use crate::services::UserInfo;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Authenticate with username and password and bind the user to the session
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user = state
        .auth_service()
        .login(&payload.username, &payload.password)
        .await?;

    // New identity, new session id.
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to cycle session: {e}")))?;

    if let Err(e) = session.insert(USER_ID_KEY, user.id.value()).await {
        return Err(ApiError::internal(format!("Failed to create session: {e}")));
    }

    tracing::Span::current().record("user_id", user.id.value());

    Ok(Json(ApiResponse::success(user)))
}

/// POST /auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (
        StatusCode::OK,
        Json(ApiResponse::success(MessageResponse {
            message: "Logged out".to_string(),
        })),
    )
}

/// GET /auth/me
/// Get current user information (requires authentication)
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user_id = require_session_user(&session).await?;
    let user = state.auth_service().current_user(user_id).await?;

    Ok(Json(ApiResponse::success(user)))
}

// ============================================================================
// Helpers
// ============================================================================

/// User bound to the session, if any.
pub async fn session_user_id(session: &Session) -> Result<Option<UserId>, ApiError> {
    let id = session
        .get::<i32>(USER_ID_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    Ok(id.map(UserId::new))
}

/// Get the session user, returns error if not authenticated
pub async fn require_session_user(session: &Session) -> Result<UserId, ApiError> {
    session_user_id(session)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}
