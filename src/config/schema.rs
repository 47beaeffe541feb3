//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every section has a working default so a bare `devgate` invocation serves
//! the common local setup (public port 5000, dev server on 127.0.0.1:5173).

use serde::{Deserialize, Serialize};

/// Root configuration for the dev gateway.
///
/// Constructed once at startup, shared via `Arc`, never mutated afterwards.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (public bind address).
    pub listener: ListenerConfig,

    /// The upstream dev server requests are forwarded to.
    pub dev_server: DevServerConfig,

    /// Path classification rules.
    pub routing: RoutingConfig,

    /// Static mounts served directly from disk.
    pub static_files: StaticConfig,

    /// WebSocket upgrade path and mode.
    pub websocket: WebSocketConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Expose the unauthenticated `/debug-info` page.
    pub debug_info_enabled: bool,

    /// Deployment environment label ("development", "production", ...).
    /// Reported by `/health`; also selects the fallback log format.
    pub environment: String,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    ///
    /// A parameter rather than a per-variant hardcode: the loopback-only
    /// and all-interfaces deployments differ only in this field.
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Upstream dev server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Dev server host.
    pub host: String,

    /// Dev server port.
    pub port: u16,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5173,
            connect_timeout_secs: 5,
        }
    }
}

impl DevServerConfig {
    /// Target authority string, e.g. `127.0.0.1:5173`.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Path classification rules.
///
/// The classifier checks these in a fixed order: HMR paths, dev prefixes,
/// asset extensions, API prefix, exact SPA routes. See `routing::classifier`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Prefix for backend API requests.
    pub api_prefix: String,

    /// Exact client-side routes that must reach the SPA entry point.
    pub spa_routes: Vec<String>,

    /// Path prefixes owned by the dev server (module loader, sources).
    pub dev_asset_prefixes: Vec<String>,

    /// File extensions treated as dev-server assets.
    pub dev_asset_extensions: Vec<String>,

    /// Hot-reload endpoints; always classified as dev assets so the
    /// live-reload connection stays alive.
    pub hmr_paths: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            spa_routes: vec![
                "/".to_string(),
                "/dashboard".to_string(),
                "/wallet".to_string(),
                "/explorer".to_string(),
                "/settings".to_string(),
                "/about".to_string(),
            ],
            dev_asset_prefixes: vec![
                "/@vite/".to_string(),
                "/@id/".to_string(),
                "/@fs/".to_string(),
                "/@react-refresh".to_string(),
                "/node_modules/".to_string(),
                "/src/".to_string(),
            ],
            dev_asset_extensions: vec![
                ".js", ".mjs", ".ts", ".tsx", ".jsx", ".css", ".scss", ".json", ".svg",
                ".png", ".jpg", ".jpeg", ".gif", ".ico", ".webp", ".woff", ".woff2",
                ".ttf", ".eot", ".map", ".wasm",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            hmr_paths: vec![
                "/__vite_ping".to_string(),
                "/@vite/client".to_string(),
                "/__open-in-editor".to_string(),
            ],
        }
    }
}

/// Static mounts served directly from disk, bypassing the proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticConfig {
    /// URL prefix for the documentation mount.
    pub docs_mount: String,

    /// Directory backing the documentation mount.
    pub docs_dir: String,

    /// Directory searched for a pre-built `index.html` used as the SPA
    /// fallback page. When absent, a minimal page is generated.
    pub public_dir: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            docs_mount: "/whitepaper".to_string(),
            docs_dir: "whitepaper".to_string(),
            public_dir: "public".to_string(),
        }
    }
}

/// WebSocket behavior on the upgrade path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WsMode {
    /// Relay frames to the dev server's HMR socket.
    Proxy,
    /// Local welcome/echo protocol, independent of the dev server.
    Echo,
}

/// WebSocket configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Upgrade path.
    pub path: String,

    /// Relay to the dev server or answer locally.
    pub mode: WsMode,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            path: "/ws".to_string(),
            mode: WsMode::Proxy,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
