//! Turning a named view and its context into a response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use super::{ApiError, ApiResponse};

/// Renders a named view with a JSON context.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, status: StatusCode, view: &str, context: Value) -> Response;
}

#[derive(Debug, Serialize)]
pub struct RenderedView {
    pub view: String,
    pub context: Value,
}

/// Default renderer: the view name and context wrapped in an [`ApiResponse`].
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonViewRenderer;

impl ViewRenderer for JsonViewRenderer {
    fn render(&self, status: StatusCode, view: &str, context: Value) -> Response {
        let body = ApiResponse::success(RenderedView {
            view: view.to_string(),
            context,
        });
        (status, Json(body)).into_response()
    }
}

/// Serializes a typed context and hands it to the renderer.
pub fn render_view<T: Serialize>(
    renderer: &dyn ViewRenderer,
    status: StatusCode,
    view: &str,
    context: &T,
) -> Response {
    match serde_json::to_value(context) {
        Ok(value) => renderer.render(status, view, value),
        Err(e) => ApiError::internal(format!("Failed to serialize '{view}' context: {e}"))
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn json_renderer_wraps_view_and_context() {
        let response = JsonViewRenderer.render(
            StatusCode::CONFLICT,
            "register",
            serde_json::json!({ "error": "taken" }),
        );
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["view"], "register");
        assert_eq!(json["data"]["context"]["error"], "taken");
    }
}
