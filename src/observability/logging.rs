//! Structured logging initialization.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and tower-http's request traces.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize the tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let default_filter = format!(
        "devgate={level},tower_http={level}",
        level = config.log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
