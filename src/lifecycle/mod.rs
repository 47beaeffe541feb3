//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Init logging/metrics → Bind listener → Serve
//!
//! Shutdown:
//!     SIGINT → trigger broadcast → stop accepting → exit 0
//!
//! Startup failure (port in use, bad config):
//!     log → exit 1, never retried
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
