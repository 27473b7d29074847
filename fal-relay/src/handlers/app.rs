use crate::AppState;
use axum::{extract::State, response::Html, Json};
use serde_json::{json, Value};
use service_core::error::AppError;
use std::io::ErrorKind;

/// Serve the UI entry file from the static root.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = state.static_files.index_path();

    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Index file not found");
            Err(AppError::NotFound(anyhow::anyhow!(
                "{} not found",
                state.static_files.index
            )))
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read index file");
            Err(AppError::from(e))
        }
    }
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "fal-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
