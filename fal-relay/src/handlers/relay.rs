//! Pass-through handlers for the FAL queue.
//!
//! Each handler makes exactly one upstream call. Failures are logged here and
//! rendered by [`RelayError`]'s `IntoResponse`.

use crate::error::RelayError;
use crate::services::JsonDocument;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};

/// `POST /api/generate`
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<JsonDocument>, RelayError> {
    let document = parse_json_body(&headers, &body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected generation request");
        e
    })?;

    state.fal.submit(&document).await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "Error calling FAL API");
        e
    })
}

/// `GET /api/status/:request_id`
pub async fn status(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<JsonDocument>, RelayError> {
    state.fal.status(&request_id).await.map(Json).map_err(|e| {
        tracing::error!(request_id = %request_id, error = %e, "Error checking status");
        e
    })
}

/// `GET /api/result/:request_id`
pub async fn result(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<JsonDocument>, RelayError> {
    state.fal.result(&request_id).await.map(Json).map_err(|e| {
        tracing::error!(request_id = %request_id, error = %e, "Error getting result");
        e
    })
}

/// Accept a JSON object or array sent as `application/json` (or a `+json`
/// subtype). Top-level scalars are rejected the way strict JSON body parsers do.
fn parse_json_body(headers: &HeaderMap, body: &[u8]) -> Result<JsonDocument, RelayError> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false);

    if !is_json {
        return Err(RelayError::InvalidBody(
            "Expected request with `Content-Type: application/json`".to_string(),
        ));
    }

    let document: JsonDocument =
        serde_json::from_slice(body).map_err(|e| RelayError::InvalidBody(e.to_string()))?;

    match document.get().as_bytes().first() {
        Some(b'{') | Some(b'[') => Ok(document),
        _ => Err(RelayError::InvalidBody(
            "Expected a JSON object or array".to_string(),
        )),
    }
}
