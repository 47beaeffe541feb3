//! devgate — development gateway for a Vite-backed single-page app.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────┐
//!                      │                 DEVGATE                     │
//!                      │                                             │
//!   Client request     │  /health, /debug-info ──► handlers (local)  │
//!   ──────────────────►│  <docs mount>/*       ──► ServeDir (disk)   │
//!                      │  <ws path>            ──► ws relay / echo   │
//!                      │  everything else:                           │
//!                      │      routing::classifier                    │
//!                      │        DevAsset/Api/SpaRoute ─► dispatcher ─┼──► Dev Server
//!                      │        Unknown ─► fallback page (local)     │     (Vite)
//!                      │                                             │
//!                      │  config · lifecycle · observability         │
//!                      └────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod proxy;
pub mod routing;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
