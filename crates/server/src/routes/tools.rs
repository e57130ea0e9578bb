use axum::{body::Bytes, extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use models::{ToolRequest, ToolResult};
use serde_json::Value;
use service::{dispatch, WRITES_DISABLED_ERROR};
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::errors::ToolApiError;
use crate::observability::record_tool_request;
use crate::state::AppState;

/// `POST /api/tools`
///
/// 解析 → 派发 → 按结果映射状态码：ok → 200，写关闭 → 403，其它失败 → 400，
/// 派发任务 panic 或结果无法编码 → 500。
pub async fn handle_tool(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match ToolRequest::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            warn!(event = "tool_rejected", error = %e, "invalid tool request");
            record_tool_request("invalid", StatusCode::BAD_REQUEST.as_u16());
            return ToolApiError::bad_request(e.to_string()).into_response();
        }
    };

    let tool = request.kind().as_str();
    let admin = state.admin.clone();
    // 在独立任务中执行，panic 不会影响连接处理
    let joined = tokio::spawn(async move { dispatch(&admin, request).await }).await;

    let result = match joined {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            record_tool_request(tool, StatusCode::INTERNAL_SERVER_ERROR.as_u16());
            return ToolApiError::internal(e.to_string()).into_response();
        }
        Err(e) => {
            record_tool_request(tool, StatusCode::INTERNAL_SERVER_ERROR.as_u16());
            return ToolApiError::internal(panic_message(e)).into_response();
        }
    };

    let status = status_for(&result);
    record_tool_request(tool, status.as_u16());
    info!(event = "tool_handled", tool, status = status.as_u16(), "tool request handled");
    (status, Json(result)).into_response()
}

pub fn status_for(result: &ToolResult<Value>) -> StatusCode {
    match result.error() {
        None => StatusCode::OK,
        Some(WRITES_DISABLED_ERROR) => StatusCode::FORBIDDEN,
        Some(_) => StatusCode::BAD_REQUEST,
    }
}

fn panic_message(err: JoinError) -> String {
    if !err.is_panic() {
        return "Unknown error".to_string();
    }
    let payload = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown error".to_string()
    }
}
