//! Configuration loading.
//!
//! The gateway is started as a plain binary with no flags: an optional TOML
//! file (path in `DEVGATE_CONFIG`) provides the base, and a small set of
//! environment variables override it. The result is validated and frozen
//! before any component sees it.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {var}: {value}")]
    Env { var: String, value: String },

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration for the running process.
///
/// Base config comes from the file named by `DEVGATE_CONFIG` when set,
/// otherwise from defaults; environment overrides are applied on top.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    let mut config = match env::var("DEVGATE_CONFIG") {
        Ok(path) => {
            let content = fs::read_to_string(Path::new(&path))?;
            toml::from_str(&content)?
        }
        Err(_) => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Environment variables recognized by the gateway.
///
/// `PORT` and `HOST` shape the public bind address; `DEV_SERVER_HOST` and
/// `DEV_SERVER_PORT` point at the upstream; `NODE_ENV` (or `DEVGATE_ENV`)
/// names the environment.
fn apply_env_overrides(config: &mut GatewayConfig) -> Result<(), ConfigError> {
    if let Ok(host) = env::var("HOST") {
        let port = current_port(&config.listener.bind_address);
        config.listener.bind_address = format!("{host}:{port}");
    }
    if let Ok(port) = env::var("PORT") {
        let port: u16 = port.parse().map_err(|_| ConfigError::Env {
            var: "PORT".to_string(),
            value: port.clone(),
        })?;
        let host = current_host(&config.listener.bind_address);
        config.listener.bind_address = format!("{host}:{port}");
    }
    if let Ok(host) = env::var("DEV_SERVER_HOST") {
        config.dev_server.host = host;
    }
    if let Ok(port) = env::var("DEV_SERVER_PORT") {
        config.dev_server.port = port.parse().map_err(|_| ConfigError::Env {
            var: "DEV_SERVER_PORT".to_string(),
            value: port.clone(),
        })?;
    }
    if let Ok(environment) = env::var("DEVGATE_ENV").or_else(|_| env::var("NODE_ENV")) {
        config.environment = environment;
    }
    if config.environment.is_empty() {
        config.environment = "development".to_string();
    }
    Ok(())
}

fn current_host(bind_address: &str) -> &str {
    bind_address.rsplit_once(':').map(|(h, _)| h).unwrap_or("0.0.0.0")
}

fn current_port(bind_address: &str) -> &str {
    bind_address.rsplit_once(':').map(|(_, p)| p).unwrap_or("5000")
}
