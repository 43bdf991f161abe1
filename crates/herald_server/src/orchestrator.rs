//! One automation cycle: validate, generate once, publish everywhere.

use herald_core::{
    AutomationRequest, AutomationResponse, GeneratedContent, Platform, PlatformResult,
    PlatformSettings, RequestValidator,
};
use herald_error::HeraldResult;
use herald_models::ContentGenerator;
use herald_social::Publishers;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

#[cfg(feature = "metrics")]
use crate::RunMetrics;

/// Runs automation cycles.
///
/// Holds no per-request state, so one instance serves concurrent requests.
#[derive(Clone)]
pub struct RunOrchestrator {
    validator: RequestValidator,
    generator: Arc<dyn ContentGenerator>,
    publishers: Publishers,
    #[cfg(feature = "metrics")]
    metrics: RunMetrics,
}

impl RunOrchestrator {
    /// Creates an orchestrator over the given collaborators.
    pub fn new(
        validator: RequestValidator,
        generator: Arc<dyn ContentGenerator>,
        publishers: Publishers,
    ) -> Self {
        Self {
            validator,
            generator,
            publishers,
            #[cfg(feature = "metrics")]
            metrics: RunMetrics::new(),
        }
    }

    /// Validates an untrusted JSON body, then runs it.
    ///
    /// # Errors
    ///
    /// A validation error when the body does not satisfy the request schema
    /// (nothing is called), or a generation error (no publisher is called).
    pub async fn run(&self, body: &Value) -> HeraldResult<AutomationResponse> {
        let request = self.validator.validate(body)?;
        self.execute(&request).await
    }

    /// Runs an already validated request.
    ///
    /// # Errors
    ///
    /// Fails only when content generation fails.
    #[instrument(skip_all, fields(topic = %request.brief().topic(), run_now = *request.schedule().run_now()))]
    pub async fn execute(&self, request: &AutomationRequest) -> HeraldResult<AutomationResponse> {
        let started = Instant::now();
        #[cfg(feature = "metrics")]
        self.metrics.record_run();

        debug!(generator = self.generator.name(), "Generating content");
        let content = match self.generator.generate(request.brief()).await {
            Ok(content) => Arc::new(content),
            Err(e) => {
                error!(error = %e, "Generation failed, no platform will be called");
                #[cfg(feature = "metrics")]
                self.metrics.record_generation_failure();
                return Err(e.into());
            }
        };

        let platform_results = self.fan_out(request.platforms(), &content).await;
        let published = platform_results.iter().filter(|r| *r.success()).count();
        let duration_ms = started.elapsed().as_millis() as u64;
        info!(published, duration_ms, "Cycle complete");

        #[cfg(feature = "metrics")]
        {
            for result in &platform_results {
                if !result.is_skipped() {
                    self.metrics.record_publish(*result.platform(), *result.success());
                }
            }
            self.metrics.record_duration(started.elapsed().as_secs_f64());
        }

        Ok(AutomationResponse::new(
            GeneratedContent::clone(&content),
            platform_results,
            *request.schedule().interval_minutes(),
        ))
    }

    /// Publishes to every enabled platform concurrently and waits for all of them.
    async fn fan_out(
        &self,
        settings: &PlatformSettings,
        content: &Arc<GeneratedContent>,
    ) -> Vec<PlatformResult> {
        let tasks: Vec<(Platform, Option<JoinHandle<PlatformResult>>)> = Platform::ALL
            .into_iter()
            .map(|platform| {
                let task = settings.credential_for(platform).map(|credential| {
                    let publisher = self.publishers.for_platform(platform);
                    let content = Arc::clone(content);
                    tokio::spawn(async move { publisher.publish(&credential, &content).await })
                });
                (platform, task)
            })
            .collect();

        let mut results = Vec::with_capacity(tasks.len());
        for (platform, task) in tasks {
            let result = match task {
                None => {
                    debug!(platform = %platform, "Platform disabled");
                    PlatformResult::skipped(platform)
                }
                Some(handle) => match handle.await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!(platform = %platform, error = %e, "Publish task did not complete");
                        PlatformResult::failed(
                            platform,
                            format!("{} publish task aborted: {}", platform.label(), e),
                        )
                    }
                },
            };
            info!(platform = %platform, success = *result.success(), message = %result.message(), "Platform outcome");
            results.push(result);
        }
        results
    }
}

impl std::fmt::Debug for RunOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunOrchestrator")
            .field("validator", &self.validator)
            .field("generator", &self.generator.name())
            .field("publishers", &self.publishers)
            .finish()
    }
}
