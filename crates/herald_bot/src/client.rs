//! How the loop reaches the run endpoint.

use async_trait::async_trait;
use herald_core::{AutomationRequest, AutomationResponse};
use herald_error::{
    HeraldError, HeraldErrorKind, HeraldResult, HttpError, JsonError, LoopError, LoopErrorKind,
    ValidationError,
};
use herald_server::{RUN_PATH, RunOrchestrator};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Runs one cycle on the loop's behalf.
#[async_trait]
pub trait RunClient: Send + Sync {
    /// Submit `request` and wait for the cycle's response.
    async fn run(&self, request: &AutomationRequest) -> HeraldResult<AutomationResponse>;
}

/// A short message for the activity log.
pub fn describe_failure(err: &HeraldError) -> String {
    match err.kind() {
        HeraldErrorKind::Validation(e) => format!("Invalid payload: {}", e.details.join("; ")),
        HeraldErrorKind::Generation(e) => e.kind.to_string(),
        HeraldErrorKind::Loop(e) => e.kind.to_string(),
        HeraldErrorKind::Publish(e) => e.kind.to_string(),
        HeraldErrorKind::Http(e) => e.message.clone(),
        HeraldErrorKind::Json(e) => e.message.clone(),
        HeraldErrorKind::Config(e) => e.message.clone(),
    }
}

/// Error body of the run endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Vec<String>,
}

/// Posts requests to a Herald server.
#[derive(Debug, Clone)]
pub struct HttpRunClient {
    client: reqwest::Client,
    url: String,
}

impl HttpRunClient {
    /// Client for the server at `base_url`, e.g. `http://127.0.0.1:3000`.
    ///
    /// `timeout` bounds a whole cycle, generation and publishing included.
    pub fn new(base_url: &str, timeout: Duration) -> HeraldResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), RUN_PATH),
        })
    }

    /// Full URL of the run endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RunClient for HttpRunClient {
    #[instrument(skip_all, fields(url = %self.url))]
    async fn run(&self, request: &AutomationRequest) -> HeraldResult<AutomationResponse> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Run request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read run response: {}", e)))?;
        debug!(status = %status, bytes = text.len(), "Run endpoint answered");

        if status.is_success() {
            return Ok(serde_json::from_str(&text)
                .map_err(|e| JsonError::new(format!("Unexpected run response: {}", e)))?);
        }

        let body: Option<ErrorBody> = serde_json::from_str(&text).ok();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            let details = body.map(|b| b.details).unwrap_or_default();
            return Err(ValidationError::new(details).into());
        }
        let message = body.map(|b| b.error).unwrap_or(text);
        Err(LoopError::new(LoopErrorKind::RunFailed {
            status: status.as_u16(),
            message,
        })
        .into())
    }
}

/// Runs cycles in-process, without an HTTP hop.
#[derive(Debug, Clone)]
pub struct LocalRunClient {
    orchestrator: RunOrchestrator,
}

impl LocalRunClient {
    /// Wraps an orchestrator.
    pub fn new(orchestrator: RunOrchestrator) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl RunClient for LocalRunClient {
    async fn run(&self, request: &AutomationRequest) -> HeraldResult<AutomationResponse> {
        // Round-trip through the wire format so the server-side rules apply here too.
        let body = serde_json::to_value(request)
            .map_err(|e| JsonError::new(format!("Failed to encode request: {}", e)))?;
        self.orchestrator.run(&body).await
    }
}
