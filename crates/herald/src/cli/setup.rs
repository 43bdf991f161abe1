//! Wiring shared by the command handlers.

use herald_bot::{HttpRunClient, LocalRunClient, RunClient};
use herald_core::{AutomationRequest, RequestValidator};
use herald_error::{ConfigError, HeraldResult, JsonError, ValidationError};
use herald_models::{GeneratorConfig, OpenAICompatibleGenerator};
use herald_server::RunOrchestrator;
use herald_social::{PublisherConfig, Publishers};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Upper bound on one cycle when the loop talks to a remote server.
const REMOTE_RUN_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Validator honoring `HERALD_DEFAULT_MEDIA_URL`.
pub fn validator(default_media_url: Option<String>) -> RequestValidator {
    let url = default_media_url.or_else(|| std::env::var("HERALD_DEFAULT_MEDIA_URL").ok());
    RequestValidator::with_default_media_url(url)
}

/// Reads a request file as raw JSON.
pub fn read_json(path: &Path) -> HeraldResult<Value> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::new(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&raw)
        .map_err(|e| JsonError::new(format!("{} is not valid JSON: {}", path.display(), e)))?)
}

/// Reads and validates a request file.
pub fn read_request(path: &Path) -> Result<AutomationRequest, Box<dyn std::error::Error>> {
    let value = read_json(path)?;
    validator(None).validate(&value).map_err(|e: ValidationError| {
        for detail in &e.details {
            eprintln!("  {}", detail);
        }
        e.into()
    })
}

/// Orchestrator with the production generator and publishers, configured from the environment.
pub fn local_orchestrator(default_media_url: Option<String>) -> HeraldResult<RunOrchestrator> {
    let generator = OpenAICompatibleGenerator::new(GeneratorConfig::from_env()?)?;
    debug!(model = generator.model_name(), "Generator configured");
    let publishers = Publishers::http(&PublisherConfig::from_env()?)?;
    Ok(RunOrchestrator::new(
        validator(default_media_url),
        Arc::new(generator),
        publishers,
    ))
}

/// HTTP client when a server URL is given, in-process otherwise.
pub fn run_client(server: Option<&str>) -> HeraldResult<Arc<dyn RunClient>> {
    Ok(match server {
        Some(url) => Arc::new(HttpRunClient::new(url, REMOTE_RUN_TIMEOUT)?),
        None => Arc::new(LocalRunClient::new(local_orchestrator(None)?)),
    })
}
