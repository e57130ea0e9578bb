use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Failure returned by `/api/tools` before or around dispatch. The body uses
/// the same `{ok: false, error}` envelope as a failed tool call.
#[derive(Debug)]
pub struct ToolApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ToolApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into() }
    }
}

impl IntoResponse for ToolApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), error = %self.message, "tool request failed");
        }
        (self.status, Json(json!({"ok": false, "error": self.message}))).into_response()
    }
}
