//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, precedence order)
//!     → handlers.rs (health, debug-info)  |  ServeDir (docs mount)
//!     → routing classifier decides the rest
//!     → proxy dispatcher or fallback.rs (SPA entry page)
//! ```

pub mod fallback;
pub mod handlers;
pub mod server;

pub use server::{AppState, GatewayServer};
