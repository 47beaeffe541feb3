//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Classified request
//!     → dispatcher.rs (URI rewrite, header rewrite, streamed forward)
//!     → dev server
//!     → response streamed back unmodified
//!
//! Upgrade request on the ws path
//!     → websocket.rs (handshake, then relay or local echo)
//! ```

pub mod dispatcher;
pub mod websocket;

pub use dispatcher::Dispatcher;
