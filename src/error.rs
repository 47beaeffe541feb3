//! Crate-level error types.
//!
//! Startup faults (bind, config) are fatal: logged once and the process
//! exits non-zero. Request-path faults never escape as panics; they are
//! rendered either as the dispatcher's plain-text 502 or as a JSON envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::config::ConfigError;

/// Fatal gateway errors surfaced from `main`.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Machine-readable error body for non-proxy endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status,
        }
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_code_and_message() {
        let envelope =
            ErrorEnvelope::new(StatusCode::UPGRADE_REQUIRED, "upgrade_required", "ws only");
        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(body["code"], "upgrade_required");
        assert_eq!(body["message"], "ws only");
    }
}
