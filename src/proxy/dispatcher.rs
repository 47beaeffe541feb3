//! HTTP forwarding to the dev server.
//!
//! # Responsibilities
//! - Rewrite the request URI to target the configured dev server
//! - Rewrite Host and X-Forwarded-* headers
//! - Stream request and response bodies through unmodified
//! - Translate upstream failures into 502 responses
//!
//! # Design Decisions
//! - One pooled hyper client for the process lifetime
//! - No retries, no circuit breaking: a dev-time proxy fails fast and the
//!   error text goes straight to the client
//! - Status, headers, and body pass through untouched on success

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::uri::{Authority, Scheme};
use axum::http::{header::HeaderValue, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::config::DevServerConfig;
use crate::observability::metrics;
use crate::routing::PathClass;

/// Forwards classified requests to the dev server.
#[derive(Clone)]
pub struct Dispatcher {
    client: Client<HttpConnector, Body>,
    target: String,
}

impl Dispatcher {
    /// Create a dispatcher for the given upstream.
    pub fn new(config: &DevServerConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            target: config.authority(),
        }
    }

    /// The upstream authority this dispatcher targets.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Forward one request and relay the response.
    pub async fn forward(
        &self,
        request: Request<Body>,
        class: PathClass,
        peer: Option<SocketAddr>,
        request_id: &str,
    ) -> Response {
        let start = Instant::now();
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        let (mut parts, body) = request.into_parts();

        // Point the URI at the dev server, keeping path and query.
        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.scheme = Some(Scheme::HTTP);
        if let Ok(authority) = Authority::from_str(&self.target) {
            uri_parts.authority = Some(authority);
        }
        let uri = Uri::from_parts(uri_parts).unwrap_or_else(|_| parts.uri.clone());

        // Forwarding headers: upstream sees itself as the host, the
        // original coordinates move into X-Forwarded-*.
        let original_host = parts
            .headers
            .get(axum::http::header::HOST)
            .cloned();
        if let Ok(host) = HeaderValue::from_str(&self.target) {
            parts.headers.insert(axum::http::header::HOST, host);
        }
        if let Some(host) = original_host {
            parts.headers.insert("x-forwarded-host", host);
        }
        parts
            .headers
            .insert("x-forwarded-proto", HeaderValue::from_static("http"));
        if let Some(peer) = peer {
            if let Ok(value) = HeaderValue::from_str(&peer.ip().to_string()) {
                parts.headers.insert("x-forwarded-for", value);
            }
        }

        let mut upstream_request = Request::from_parts(parts, body);
        *upstream_request.uri_mut() = uri;

        match self.client.request(upstream_request).await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    class = class.as_str(),
                    status = status.as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Proxied request"
                );
                metrics::record_request(method.as_str(), status.as_u16(), class, start);

                let (parts, body) = response.into_parts();
                Response::from_parts(parts, Body::new(body))
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    target = %self.target,
                    error = %e,
                    "Upstream request failed"
                );
                metrics::record_request(method.as_str(), 502, class, start);

                // Dev-only tool: the raw failure reason is intentionally
                // surfaced to the client.
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Failed to reach dev server at {}: {}", self.target, e),
                )
                    .into_response()
            }
        }
    }
}
