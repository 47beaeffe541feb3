//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (DEVGATE_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → env overrides (PORT, HOST, DEV_SERVER_*, NODE_ENV)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is built exactly once at startup and injected by reference;
//!   no component reads the environment after initialization
//! - All fields have defaults so the zero-config local case works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    DevServerConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, RoutingConfig,
    StaticConfig, TimeoutConfig, WebSocketConfig, WsMode,
};
