//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → classifier.rs (ordered rule checks)
//!     → PathClass: DevAsset | Api | SpaRoute | Unknown
//!
//! Rule Compilation (at startup):
//!     RoutingConfig
//!     → RouteRules (frozen)
//! ```
//!
//! # Design Decisions
//! - Deterministic: same path always yields the same class
//! - First matching category wins (HMR > prefixes > extensions > API > SPA)

pub mod classifier;

pub use classifier::{PathClass, RouteRules};
