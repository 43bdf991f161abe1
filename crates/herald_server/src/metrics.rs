//! Metrics for automation runs.
//!
//! Available with the `metrics` feature.

use herald_core::Platform;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use tracing::debug;

/// Run-level counters and per-platform publish outcomes.
#[derive(Clone)]
pub struct RunMetrics {
    /// Total runs that passed validation
    pub runs: Counter<u64>,
    /// Runs aborted because generation failed
    pub generation_failures: Counter<u64>,
    /// Publish attempts, labelled by platform and outcome
    pub publishes: Counter<u64>,
    /// End-to-end run duration in seconds
    pub duration: Histogram<f64>,
}

impl RunMetrics {
    /// Create run metrics on the global meter.
    pub fn new() -> Self {
        debug!("Building run metrics instruments");
        let meter = global::meter("herald_server");

        let runs = meter
            .u64_counter("herald.runs")
            .with_description("Automation runs that passed validation")
            .build();
        let generation_failures = meter
            .u64_counter("herald.generation_failures")
            .with_description("Runs aborted by a generation failure")
            .build();
        let publishes = meter
            .u64_counter("herald.publishes")
            .with_description("Publish attempts by platform and outcome")
            .build();
        let duration = meter
            .f64_histogram("herald.run.duration")
            .with_unit("seconds")
            .with_description("Automation run duration")
            .build();

        Self {
            runs,
            generation_failures,
            publishes,
            duration,
        }
    }

    /// Record a run that reached the generator.
    pub fn record_run(&self) {
        self.runs.add(1, &[]);
    }

    /// Record a generation failure.
    pub fn record_generation_failure(&self) {
        self.generation_failures.add(1, &[]);
    }

    /// Record one platform outcome.
    pub fn record_publish(&self, platform: Platform, success: bool) {
        let labels = &[
            KeyValue::new("platform", platform.to_string()),
            KeyValue::new("success", success),
        ];
        self.publishes.add(1, labels);
    }

    /// Record how long a completed run took.
    pub fn record_duration(&self, duration_secs: f64) {
        self.duration.record(duration_secs, &[]);
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
