//! Metrics collection and exposition.
//!
//! # Metrics
//! - `devgate_requests_total` (counter): requests by method, status, class
//! - `devgate_request_duration_seconds` (histogram): latency by class
//!
//! Recording is a no-op until an exporter is installed, so the hot path
//! never branches on whether metrics are enabled.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::PathClass;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, class: PathClass, start: Instant) {
    metrics::counter!(
        "devgate_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "class" => class.as_str(),
    )
    .increment(1);
    metrics::histogram!("devgate_request_duration_seconds", "class" => class.as_str())
        .record(start.elapsed().as_secs_f64());
}
