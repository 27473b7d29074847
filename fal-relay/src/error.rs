//! Errors surfaced by the relay handlers.
//!
//! Every upstream failure collapses into the same `{"error": "..."}` body with
//! status 500; callers distinguish causes only by the message text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Upstream answered outside the 2xx range.
    #[error("FAL API error: {status} {reason}")]
    UpstreamStatus { status: u16, reason: String },

    /// Connection refused, DNS failure, timeout, or a body that could not be read.
    #[error("FAL API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("FAL API returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    /// `.` and `..` cannot be sent as a single path segment.
    #[error("Invalid request id: '{0}'")]
    InvalidRequestId(String),

    /// The caller's body was not a JSON document. Never reaches the upstream.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl RelayError {
    pub fn upstream_status(status: reqwest::StatusCode) -> Self {
        RelayError::UpstreamStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidBody(_) | RelayError::InvalidRequestId(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
