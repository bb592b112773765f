use crate::config::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hearsay_mcp::protocol::ListToolsResult;
use std::sync::Arc;

/// One JSON-RPC message per request. Notifications get `202 Accepted` and
/// no body.
pub async fn mcp_message(State(state): State<Arc<AppState>>, body: String) -> Response {
    match state.mcp.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Schemas of every registered tool
pub async fn list_tools(State(state): State<Arc<AppState>>) -> Json<ListToolsResult> {
    Json(ListToolsResult {
        tools: state.mcp.registry().list_schemas(),
    })
}
