//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; request ID flows through handler logs
//! - Metric updates are cheap (atomic increments) and label on method,
//!   status, and path class
//! - The Prometheus exporter is optional and lives on its own address

pub mod logging;
pub mod metrics;
