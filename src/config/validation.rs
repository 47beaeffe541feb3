//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check path-shaped fields actually start with `/`
//! - Detect duplicate SPA routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must start with '/': {value}")]
    NotAPath { field: &'static str, value: String },

    #[error("duplicate SPA route: {0}")]
    DuplicateSpaRoute(String),

    #[error("dev asset extension must start with '.': {0}")]
    BadExtension(String),

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_path(&mut errors, "routing.api_prefix", &config.routing.api_prefix);
    check_path(&mut errors, "static_files.docs_mount", &config.static_files.docs_mount);
    check_path(&mut errors, "websocket.path", &config.websocket.path);

    let mut seen = std::collections::HashSet::new();
    for route in &config.routing.spa_routes {
        check_path(&mut errors, "routing.spa_routes", route);
        if !seen.insert(route.as_str()) {
            errors.push(ValidationError::DuplicateSpaRoute(route.clone()));
        }
    }

    for prefix in &config.routing.dev_asset_prefixes {
        check_path(&mut errors, "routing.dev_asset_prefixes", prefix);
    }

    for ext in &config.routing.dev_asset_extensions {
        if !ext.starts_with('.') {
            errors.push(ValidationError::BadExtension(ext.clone()));
        }
    }

    if config.listener.bind_address.is_empty() {
        errors.push(ValidationError::Empty {
            field: "listener.bind_address",
        });
    }
    if config.dev_server.host.is_empty() {
        errors.push(ValidationError::Empty {
            field: "dev_server.host",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_path(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if !value.starts_with('/') {
        errors.push(ValidationError::NotAPath {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::GatewayConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.routing.api_prefix = "api".to_string();
        config.websocket.path = "ws".to_string();
        config.routing.spa_routes.push("/dashboard".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::DuplicateSpaRoute("/dashboard".into())));
    }
}
