//! devgate binary entry point.
//!
//! Started as a plain process, no flags: configuration comes from the
//! environment (`PORT`, `HOST`, `DEV_SERVER_HOST`, `DEV_SERVER_PORT`,
//! `NODE_ENV`) on top of an optional TOML file named by `DEVGATE_CONFIG`.
//!
//! Exit codes: 0 on interrupt, 1 on fatal startup error (bad config, port
//! already bound).

use std::sync::Arc;

use tokio::net::TcpListener;

use devgate::config;
use devgate::lifecycle::{signals, Shutdown};
use devgate::observability::{logging, metrics};
use devgate::{GatewayError, GatewayServer};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The subscriber may not be installed yet for config errors, so the
        // conflict also goes to stderr directly.
        tracing::error!(error = %e, "Fatal startup error");
        eprintln!("devgate: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), GatewayError> {
    let config = config::load_from_env()?;

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        dev_server = %config.dev_server.authority(),
        environment = %config.environment,
        "devgate starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    // Port conflicts are fatal and never retried.
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| GatewayError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_interrupt_listener(shutdown.clone());

    let server = GatewayServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
