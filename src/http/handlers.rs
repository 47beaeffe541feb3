//! Direct endpoints answered by the gateway itself.
//!
//! `/health` reports liveness without touching the upstream, so monitors see
//! the gateway's own state even when the dev server is down. `/debug-info`
//! is a development aid: an unauthenticated HTML dump of process metrics.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub timestamp: u64,
    /// Seconds since process start.
    pub uptime: u64,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        timestamp: unix_timestamp(),
        uptime: state.started_at.elapsed().as_secs(),
    })
}

/// `GET /debug-info`
pub async fn debug_info(State(state): State<AppState>) -> Html<String> {
    let config = &state.config;
    let mut page = String::from("<!DOCTYPE html><html><head><title>devgate debug</title></head><body>");
    page.push_str("<h1>devgate debug info</h1><table border=\"1\" cellpadding=\"4\">");

    let mut row = |key: &str, value: String| {
        page.push_str(&format!("<tr><td>{key}</td><td>{value}</td></tr>"));
    };

    row("version", env!("CARGO_PKG_VERSION").to_string());
    row("environment", config.environment.clone());
    row("pid", std::process::id().to_string());
    row("uptime_secs", state.started_at.elapsed().as_secs().to_string());
    row("bind_address", config.listener.bind_address.clone());
    row("dev_server", config.dev_server.authority());
    row("websocket_path", config.websocket.path.clone());
    row("websocket_mode", format!("{:?}", config.websocket.mode));
    row("docs_mount", config.static_files.docs_mount.clone());
    row("fallback_generated", state.fallback.is_generated().to_string());
    row("spa_routes", config.routing.spa_routes.join(", "));

    page.push_str("</table></body></html>");
    Html(page)
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
