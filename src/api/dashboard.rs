use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user_id;
use super::view::render_view;
use super::{ApiError, AppState, DashboardContext};
use crate::services::DashboardError;

/// GET /admin/dashboard
/// Summary counts and recent zones; anyone but a superuser is sent home
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, ApiError> {
    let actor = session_user_id(&session).await?;

    match state.dashboard_service().summary(actor).await {
        Ok(summary) => {
            let context = DashboardContext {
                page_title: "Dashboard",
                summary,
            };
            Ok(render_view(
                state.renderer.as_ref(),
                StatusCode::OK,
                "dashboard",
                &context,
            ))
        }
        Err(DashboardError::Unauthorized) => Ok(Redirect::to("/").into_response()),
        Err(e) => Err(e.into()),
    }
}
