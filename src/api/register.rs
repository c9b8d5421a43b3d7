//! Public self-registration endpoints.
//!
//! `GET /api/register` renders the form and makes sure the session carries a
//! CSRF token. `POST /api/register` submits it; success redirects to the login
//! page, every failure re-renders the form with one message.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::warn;

use super::view::render_view;
use super::{ApiError, AppState, RegisterFormContext};
use crate::constants::registration::SUCCESS_QUERY;
use crate::constants::session::CSRF_TOKEN_KEY;
use crate::services::csrf;
use crate::services::{RegistrationError, RegistrationForm};

const VIEW: &str = "register";

const fn status_for(err: &RegistrationError) -> StatusCode {
    match err {
        RegistrationError::InvalidToken => StatusCode::FORBIDDEN,
        RegistrationError::MissingFields | RegistrationError::PasswordMismatch => {
            StatusCode::BAD_REQUEST
        }
        RegistrationError::DuplicateUsername => StatusCode::CONFLICT,
        RegistrationError::NoPublicRoleAvailable
        | RegistrationError::InsertFailure(_)
        | RegistrationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn ensure_enabled(state: &AppState) -> Result<(), ApiError> {
    if state.config().read().await.registration.enabled {
        Ok(())
    } else {
        Err(ApiError::NotFound("Registration is disabled".to_string()))
    }
}

fn login_redirect(login_path: &str) -> String {
    let separator = if login_path.contains('?') { '&' } else { '?' };
    format!("{login_path}{separator}{SUCCESS_QUERY}")
}

fn render(state: &AppState, status: StatusCode, context: &RegisterFormContext) -> Response {
    render_view(state.renderer.as_ref(), status, VIEW, context)
}

/// GET /register
/// Render the registration form, creating the session's CSRF token if needed
pub async fn show_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, ApiError> {
    ensure_enabled(&state).await?;

    let existing = session
        .get::<String>(CSRF_TOKEN_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    let csrf_token = match existing {
        Some(token) => token,
        None => {
            let token = csrf::generate_token();
            session
                .insert(CSRF_TOKEN_KEY, &token)
                .await
                .map_err(|e| ApiError::internal(format!("Failed to store CSRF token: {e}")))?;
            token
        }
    };

    let context = RegisterFormContext::new(csrf_token);

    Ok(render(&state, StatusCode::OK, &context))
}

/// POST /register
/// Create a guest account from the submitted form
pub async fn submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, ApiError> {
    ensure_enabled(&state).await?;

    let session_token = session.get::<String>(CSRF_TOKEN_KEY).await.unwrap_or_else(|e| {
        warn!("Failed to read CSRF token from session: {e}");
        None
    });

    match state
        .registration_service()
        .register(session_token.as_deref(), &form)
        .await
    {
        Ok(_) => {
            metrics::counter!("registrations_total", "outcome" => "success").increment(1);

            let login_path = state.config().read().await.registration.login_path.clone();
            Ok(Redirect::to(&login_redirect(&login_path)).into_response())
        }
        Err(err) => {
            metrics::counter!("registrations_total", "outcome" => err.kind()).increment(1);
            if let RegistrationError::InsertFailure(detail) | RegistrationError::Internal(detail) =
                &err
            {
                warn!(outcome = err.kind(), "Registration failed: {detail}");
            }

            // The live token is echoed back unchanged; an absent one renders empty.
            let context = RegisterFormContext {
                error: Some(err.user_message().to_string()),
                username: form.username.trim().to_string(),
                fullname: form.fullname.trim().to_string(),
                email: form.email.trim().to_string(),
                ..RegisterFormContext::new(session_token.unwrap_or_default())
            };

            Ok(render(&state, status_for(&err), &context))
        }
    }
}
