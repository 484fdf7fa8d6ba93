//! Webhook HTTP server.
//!
//! Telegram pushes updates to `POST /webhook/{token}`. Each request is decoded
//! and dispatched inline; the response is sent once the reply has gone out.
//! Runs on PORT (default 5000), bound to all interfaces.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use teloxide::types::Update;
use tokio::net::TcpListener;

use crate::core::error::AppResult;
use crate::telegram::handlers::{handle_update, HandlerDeps};

/// Header Telegram sets when the webhook was registered with a secret token
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Shared state for the web server.
#[derive(Clone)]
struct WebState {
    deps: HandlerDeps,
}

/// Builds the router: `/webhook/{token}` (POST only) and `/health`.
pub fn create_router(deps: HandlerDeps) -> Router {
    Router::new()
        .route("/webhook/{token}", post(webhook_handler).fallback(forbidden_handler))
        .route("/health", get(health_handler))
        .with_state(WebState { deps })
}

/// Start the webhook server and serve until Ctrl-C.
pub async fn start_web_server(deps: HandlerDeps, port: u16) -> AppResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = create_router(deps);

    log::info!("Starting web server on http://{}", addr);
    log::info!("  /webhook/<token> - Telegram updates (POST)");
    log::info!("  /health          - Health check");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Web server stopped");
    Ok(())
}

/// POST /webhook/{token}: decode the update, dispatch it, answer `OK`.
///
/// Payloads that don't parse are acknowledged too, so Telegram does not keep
/// redelivering them.
async fn webhook_handler(
    State(state): State<WebState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let config = &state.deps.config;
    if !config.token_matches(&token) {
        log::warn!("Webhook request with unknown token path");
        return (StatusCode::NOT_FOUND, "Not Found");
    }

    let provided = headers.get(SECRET_TOKEN_HEADER).and_then(|v| v.to_str().ok());
    if !config.webhook_secret_matches(provided) {
        log::warn!("Webhook request with missing or invalid secret token header");
        return (StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => handle_update(&state.deps, update).await,
        Err(e) => log::warn!("Ignoring malformed update payload ({} bytes): {}", body.len(), e),
    }

    (StatusCode::OK, "OK")
}

/// Any non-POST method on the webhook path
async fn forbidden_handler() -> (StatusCode, &'static str) {
    (StatusCode::FORBIDDEN, "Forbidden")
}

/// GET /health: simple health check.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down gracefully...");
}
