//! HTTP API: the run endpoint and a health check.

use crate::RunOrchestrator;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use herald_core::AutomationResponse;
use herald_error::{HeraldError, HeraldErrorKind, ValidationError};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, instrument, warn};

/// Path of the run endpoint.
pub const RUN_PATH: &str = "/api/agent/run";

/// Error body returned by the run endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// 422 with one detail per failed rule
    InvalidPayload(Vec<String>),
    /// 500 with a message
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidPayload(err.details)
    }
}

impl From<HeraldError> for ApiError {
    fn from(err: HeraldError) -> Self {
        match err.into_kind() {
            HeraldErrorKind::Validation(e) => e.into(),
            HeraldErrorKind::Generation(e) => {
                ApiError::Internal(format!("Content generation failed: {}", e.kind))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidPayload(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "Invalid payload", "details": details })),
            )
                .into_response(),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

/// Creates the API router.
pub fn create_router(orchestrator: RunOrchestrator) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(RUN_PATH, post(run_agent))
        .with_state(Arc::new(orchestrator))
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Runs one cycle for the posted request.
///
/// The body is taken as raw bytes so that malformed JSON is reported as an
/// invalid payload instead of axum's plain-text rejection.
#[instrument(skip_all)]
async fn run_agent(
    State(orchestrator): State<Arc<RunOrchestrator>>,
    body: Bytes,
) -> Result<Json<AutomationResponse>, ApiError> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Request body is not JSON");
        ApiError::InvalidPayload(vec![format!("body: Malformed JSON ({})", e)])
    })?;

    match orchestrator.run(&body).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            let api_error = ApiError::from(e);
            match &api_error {
                ApiError::InvalidPayload(details) => warn!(?details, "Rejected invalid payload"),
                ApiError::Internal(message) => error!(error = %message, "Run failed"),
            }
            Err(api_error)
        }
    }
}
