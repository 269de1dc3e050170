//! HTTP transport implementation.
//!
//! JSON-RPC tool calls over POST, an SSE keep-alive channel on the same
//! path, and a few read-only GET endpoints (tool catalog, server info,
//! health).

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};

use super::config::HttpConfig;
use super::dispatch::dispatch;
use super::error::{TransportError, TransportResult};
use super::jsonrpc::RpcReply;
use super::sse::keep_alive_stream;
use crate::core::McpServer;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
}

/// Build the router for a server.
pub fn build_router(server: McpServer, config: &HttpConfig) -> Router {
    let state = AppState { server };

    let mut app = Router::new()
        .route(&config.rpc_path, get(handle_sse).post(handle_rpc))
        .route("/tools", get(list_tools))
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .with_state(state);

    // Add CORS if enabled
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Run until the process receives Ctrl-C.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        let app = build_router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → SSE:      GET {}", self.config.rpc_path);
        info!("  → Tools:    GET /tools");
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Root handler - static server information.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.server.server_info())
}

/// Tool catalog.
async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "tools": state.server.list_tools()
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests. The body is taken raw so malformed JSON can be
/// answered with a JSON-RPC parse error instead of axum's rejection.
#[instrument(skip_all, fields(body_len = body.len()))]
async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> RpcReply {
    let reply = dispatch(&state.server, &body).await;
    match reply.error_code() {
        Some(code) => info!("Request finished with error code {}", code),
        None => info!("Request finished successfully"),
    }
    reply
}

async fn handle_sse() -> impl IntoResponse {
    keep_alive_stream()
}
