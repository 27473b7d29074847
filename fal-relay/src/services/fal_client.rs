//! FAL queue API client.
//!
//! Forwards opaque JSON documents to the queue endpoints with the relay's
//! credential attached. Nothing is validated or reshaped on the way through:
//! the bytes the caller sent are the bytes FAL receives, and vice versa.

use crate::config::FalSettings;
use crate::error::RelayError;
use crate::services::metrics;
use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};
use secrecy::ExposeSecret;
use serde_json::value::RawValue;
use std::time::Instant;

/// An unparsed JSON document passed through the relay untouched.
pub type JsonDocument = Box<RawValue>;

/// The three upstream calls the relay makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Submit,
    Status,
    Result,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Submit => "submit",
            Operation::Status => "status",
            Operation::Result => "result",
        }
    }
}

pub struct FalClient {
    client: Client,
    base_url: Url,
    model_segments: Vec<String>,
    authorization: HeaderValue,
}

impl FalClient {
    pub fn new(settings: &FalSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .with_context(|| format!("Invalid FAL base URL '{}'", settings.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!(
                "FAL base URL '{}' cannot carry a path",
                settings.base_url
            ));
        }

        let mut authorization =
            HeaderValue::from_str(&format!("Key {}", settings.api_key.expose_secret()))
                .context("FAL API key contains characters not allowed in a header")?;
        authorization.set_sensitive(true);

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        tracing::info!(
            base_url = %base_url,
            model_path = %settings.model_path,
            timeout_secs = settings.timeout_secs,
            "Initialized FAL client"
        );

        Ok(Self {
            client,
            base_url,
            model_segments: settings
                .model_path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
            authorization,
        })
    }

    /// `{base}/{model}`
    pub fn submit_url(&self) -> Result<Url, RelayError> {
        self.endpoint(&[])
    }

    /// `{base}/{model}/requests/{request_id}/status`
    pub fn status_url(&self, request_id: &str) -> Result<Url, RelayError> {
        self.endpoint(&["requests", job_segment(request_id)?, "status"])
    }

    /// `{base}/{model}/requests/{request_id}`
    pub fn result_url(&self, request_id: &str) -> Result<Url, RelayError> {
        self.endpoint(&["requests", job_segment(request_id)?])
    }

    /// Queue a generation job. The upstream answers with the job's request id.
    pub async fn submit(&self, body: &RawValue) -> Result<JsonDocument, RelayError> {
        let url = self.submit_url()?;

        tracing::info!(url = %url, body_bytes = body.get().len(), "Submitting job to FAL");

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.get().to_owned());

        self.send(Operation::Submit, request).await
    }

    pub async fn status(&self, request_id: &str) -> Result<JsonDocument, RelayError> {
        let url = self.status_url(request_id)?;
        tracing::debug!(url = %url, "Checking FAL job status");
        self.send(Operation::Status, self.client.get(url)).await
    }

    pub async fn result(&self, request_id: &str) -> Result<JsonDocument, RelayError> {
        let url = self.result_url(request_id)?;
        tracing::debug!(url = %url, "Fetching FAL job result");
        self.send(Operation::Result, self.client.get(url)).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RelayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RelayError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&self.model_segments)
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<JsonDocument, RelayError> {
        let start = Instant::now();
        let outcome = self.execute(request).await;
        metrics::record_upstream_call(operation, outcome.is_ok(), start.elapsed());

        match &outcome {
            Ok(_) => tracing::debug!(
                operation = operation.as_str(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "FAL call succeeded"
            ),
            Err(e) => tracing::warn!(
                operation = operation.as_str(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                error = %e,
                "FAL call failed"
            ),
        }

        outcome
    }

    async fn execute(&self, request: RequestBuilder) -> Result<JsonDocument, RelayError> {
        let response = request
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = %status, body = %body, "FAL error response");
            return Err(RelayError::upstream_status(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// URL path segment pushing drops `.` and `..` instead of encoding them, which
/// would silently point the call at a different upstream resource.
fn job_segment(request_id: &str) -> Result<&str, RelayError> {
    match request_id {
        "" | "." | ".." => Err(RelayError::InvalidRequestId(request_id.to_string())),
        id => Ok(id),
    }
}
