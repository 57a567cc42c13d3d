//! HTTP transport.
//!
//! Binds the tool registry, OAuth authority, and event stream to their
//! endpoints. All request handling is per-request with no cross-request
//! coordination; registries live in the shared [`AppState`].

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::Sse,
    },
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::events;
use super::oauth::{OAuthStore, handlers as oauth_handlers};
use crate::error::ToolError;
use crate::tools::{McpTool, ToolContext};

/// Shared state for HTTP handlers.
pub struct AppState {
    pub tools: Vec<Box<dyn McpTool>>,
    pub ctx: ToolContext,
    pub oauth: OAuthStore,
}

/// Create the HTTP router.
pub fn create_router(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext, oauth: OAuthStore) -> Router {
    let state = Arc::new(AppState { tools, ctx, oauth });

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/oauth/authorize", get(oauth_handlers::handle_authorize))
        .route("/oauth/token", post(oauth_handlers::handle_token))
        .route(
            "/api/clients",
            get(oauth_handlers::handle_clients_list).post(oauth_handlers::handle_register),
        )
        .route("/api/clients/register", post(oauth_handlers::handle_register))
        .route("/api/tools/list", post(handle_tools_list))
        .route("/api/tools/call", post(handle_tools_call))
        .route("/sse", get(handle_sse))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /`
///
/// Service index for humans poking at the deployment.
async fn handle_root() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": events::SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "mcp": "/sse",
            "oauth_authorize": "/oauth/authorize",
            "oauth_token": "/oauth/token",
            "clients": "/api/clients",
            "tools": "/api/tools/list",
            "health": "/health"
        }
    }))
}

/// `GET /health`
///
/// Liveness plus a bounded probe of the upstream weather API.
async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let upstream = state.ctx.client.probe().await;

    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "weather_api": upstream.as_str(),
        "endpoints": [
            "/sse",
            "/oauth/authorize",
            "/oauth/token",
            "/api/clients",
            "/api/tools/list",
            "/api/tools/call",
            "/health"
        ]
    }))
}

/// `POST /api/tools/list`
async fn handle_tools_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let tools: Vec<serde_json::Value> = state
        .tools
        .iter()
        .map(|t| {
            serde_json::json!({
                "name": t.name(),
                "description": t.description(),
                "inputSchema": t.input_schema(),
            })
        })
        .collect();

    Json(serde_json::json!({ "tools": tools }))
}

#[derive(Debug, Deserialize)]
struct ToolCallRequest {
    name: Option<String>,
    #[serde(default)]
    arguments: serde_json::Value,
}

/// `POST /api/tools/call`
async fn handle_tools_call(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ToolCallRequest>,
) -> Response {
    let Some(name) = req.name.as_deref() else {
        return error_response(&ToolError::validation("name", "parameter is required"));
    };

    let Some(tool) = state.tools.iter().find(|t| t.name() == name) else {
        return error_response(&ToolError::unknown_tool(name));
    };

    let arguments = if req.arguments.is_null() {
        serde_json::json!({})
    } else {
        req.arguments
    };

    tracing::info!(tool = %name, "Executing tool");

    match tool.execute(&state.ctx, arguments).await {
        Ok(text) => Json(serde_json::json!({
            "content": [{
                "type": "text",
                "text": text
            }]
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(tool = %name, error = %e, "Tool execution failed");
            error_response(&e)
        }
    }
}

/// `GET /sse`
///
/// Long-lived event stream: one connect event, then heartbeats until the
/// peer goes away.
async fn handle_sse(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let tool_names: Vec<String> = state.tools.iter().map(|t| t.name().to_string()).collect();

    tracing::info!("New SSE connection");

    (
        [
            ("X-Accel-Buffering", "no"),
            ("Cache-Control", "no-cache, no-store, must-revalidate"),
        ],
        Sse::new(events::heartbeat_stream(tool_names)),
    )
}

/// Render a tool error as a structured response with its mapped status.
fn error_response(error: &ToolError) -> Response {
    let status =
        StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(serde_json::json!({ "detail": error.to_string() }))).into_response()
}
