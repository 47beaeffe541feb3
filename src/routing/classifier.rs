//! Request path classification.
//!
//! # Responsibilities
//! - Decide, per request path, which pipeline stage owns it
//! - Compile the configured rule lists into an immutable table
//!
//! # Design Decisions
//! - Tagged enum instead of ad hoc boolean string checks
//! - Pure and total: every path maps to exactly one class, no side effects
//! - Rules compiled at startup, immutable at runtime, no locks needed
//! - No regex in the hot path (prefix/suffix/exact matching only)

use crate::config::RoutingConfig;

/// The handler category a request path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Module, source, or asset request owned by the dev server.
    DevAsset,
    /// Backend API request, forwarded under the configured prefix.
    Api,
    /// Known client-side route; resolves to the SPA entry point upstream.
    SpaRoute,
    /// Anything else; served the fallback page locally.
    Unknown,
}

impl PathClass {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            PathClass::DevAsset => "dev_asset",
            PathClass::Api => "api",
            PathClass::SpaRoute => "spa_route",
            PathClass::Unknown => "unknown",
        }
    }
}

/// Compiled classification rules.
///
/// Built once from [`RoutingConfig`] at startup.
#[derive(Debug, Clone)]
pub struct RouteRules {
    api_prefix: String,
    spa_routes: Vec<String>,
    dev_asset_prefixes: Vec<String>,
    dev_asset_extensions: Vec<String>,
    hmr_paths: Vec<String>,
}

impl RouteRules {
    /// Compile rules from configuration.
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            api_prefix: config.api_prefix.clone(),
            spa_routes: config.spa_routes.clone(),
            dev_asset_prefixes: config.dev_asset_prefixes.clone(),
            dev_asset_extensions: config.dev_asset_extensions.clone(),
            hmr_paths: config.hmr_paths.clone(),
        }
    }

    /// Classify a request path.
    ///
    /// Hot-reload endpoints are checked first: they must reach the dev
    /// server to keep the live-reload connection alive, whatever their
    /// shape. Extension matching ignores any query string the caller
    /// forgot to strip.
    pub fn classify(&self, path: &str) -> PathClass {
        let path = path.split('?').next().unwrap_or(path);

        if self.hmr_paths.iter().any(|p| path == p || path.starts_with(p.as_str())) {
            return PathClass::DevAsset;
        }

        if self.dev_asset_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
            return PathClass::DevAsset;
        }

        if self.dev_asset_extensions.iter().any(|ext| path.ends_with(ext.as_str())) {
            return PathClass::DevAsset;
        }

        if path.starts_with(&self.api_prefix) {
            return PathClass::Api;
        }

        if self.spa_routes.iter().any(|r| path == r) {
            return PathClass::SpaRoute;
        }

        PathClass::Unknown
    }
}
