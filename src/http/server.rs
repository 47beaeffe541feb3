//! HTTP server setup and request pipeline.
//!
//! # Responsibilities
//! - Build the Axum Router with all handlers in precedence order
//! - Wire up middleware (tracing, timeout, request ID)
//! - Classify unmatched paths and dispatch them
//! - Own the WebSocket upgrade path
//!
//! # Precedence
//! ```text
//! /health            → answered locally, always
//! /debug-info        → answered locally (when enabled)
//! <docs mount>/*     → ServeDir, bypasses the proxy
//! <ws path>          → upgrade: HMR relay or local echo
//! everything else    → classify:
//!     DevAsset | Api | SpaRoute → forward to dev server
//!     Unknown                   → serve the SPA fallback page
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts, State, WebSocketUpgrade},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, WsMode};
use crate::error::ErrorEnvelope;
use crate::http::fallback::FallbackPage;
use crate::observability::metrics;
use crate::proxy::{websocket, Dispatcher};
use crate::routing::{PathClass, RouteRules};

/// Application state injected into handlers.
///
/// Everything here is immutable after startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub rules: Arc<RouteRules>,
    pub dispatcher: Dispatcher,
    pub fallback: Arc<FallbackPage>,
    pub started_at: Instant,
}

/// The top-level gateway server.
pub struct GatewayServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl GatewayServer {
    /// Create a new server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let config = Arc::new(config);
        let rules = Arc::new(RouteRules::from_config(&config.routing));
        let dispatcher = Dispatcher::new(&config.dev_server);
        let fallback = Arc::new(FallbackPage::load(std::path::Path::new(
            &config.static_files.public_dir,
        )));

        let state = AppState {
            config: config.clone(),
            rules,
            dispatcher,
            fallback,
            started_at: Instant::now(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router: direct handlers first, classifier fallback last.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new().route("/health", get(crate::http::handlers::health));

        if config.debug_info_enabled {
            router = router.route("/debug-info", get(crate::http::handlers::debug_info));
        }

        let docs_dir = std::path::Path::new(&config.static_files.docs_dir);
        router = router.nest_service(&config.static_files.docs_mount, ServeDir::new(docs_dir));

        router = router.route(&config.websocket.path, any(ws_handler));

        router
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server until the shutdown signal fires.
    ///
    /// Accepting stops on shutdown; in-flight requests are not drained, which
    /// is acceptable for a development-time proxy.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            dev_server = %self.config.dev_server.authority(),
            environment = %self.config.environment,
            "Gateway listening"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Gateway stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Catch-all handler: classify the path and route accordingly.
async fn dispatch_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let path = request.uri().path().to_string();
    let class = state.rules.classify(&path);

    match class {
        PathClass::DevAsset | PathClass::Api | PathClass::SpaRoute => {
            state
                .dispatcher
                .forward(request, class, Some(peer), &request_id)
                .await
        }
        PathClass::Unknown => {
            // Unclassified paths resolve to the SPA entry so client-side
            // routing gets a chance at them.
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                "Unclassified path, serving fallback page"
            );
            let start = Instant::now();
            metrics::record_request(request.method().as_str(), 200, class, start);
            Html(state.fallback.html().to_string()).into_response()
        }
    }
}

/// WebSocket upgrade handler for the configured path.
///
/// Non-upgrade requests on this path get a machine-readable error envelope
/// instead of being misrouted to the classifier.
async fn ws_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (mut parts, _body) = request.into_parts();
    let uri = parts.uri.clone();

    let ws = match WebSocketUpgrade::from_request_parts(&mut parts, &()).await {
        Ok(ws) => ws,
        Err(_) => {
            return ErrorEnvelope::new(
                StatusCode::UPGRADE_REQUIRED,
                "upgrade_required",
                format!("{} only accepts WebSocket upgrades", uri.path()),
            )
            .into_response();
        }
    };

    match state.config.websocket.mode {
        WsMode::Proxy => {
            let query = uri
                .query()
                .map(|q| format!("?{q}"))
                .unwrap_or_default();
            let upstream_url = format!(
                "ws://{}{}{}",
                state.dispatcher.target(),
                uri.path(),
                query
            );
            tracing::debug!(url = %upstream_url, "WebSocket upgrade, relaying upstream");
            ws.on_upgrade(move |socket| websocket::proxy(socket, upstream_url))
        }
        WsMode::Echo => {
            tracing::debug!("WebSocket upgrade, local echo mode");
            ws.on_upgrade(websocket::echo)
        }
    }
}
