//! Interrupt handling.
//!
//! Ctrl+C stops accepting connections and exits 0. There is no drain period:
//! in-flight requests on a dev proxy are cheap to drop.

use std::sync::Arc;

use crate::lifecycle::shutdown::Shutdown;

/// Spawn a task that triggers shutdown when the interrupt signal arrives.
pub fn spawn_interrupt_listener(shutdown: Arc<Shutdown>) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install interrupt handler");
            return;
        }
        tracing::info!("Interrupt received, shutting down");
        shutdown.trigger();
    });
}
