//! The automation loop as a pure state machine.
//!
//! [`LoopController`] never touches the network or the clock. Callers pass
//! the current time in and carry out the [`Command`]s it hands back, which
//! keeps every transition testable without a runtime.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use herald_core::{ActivityLog, AutomationRequest, AutomationResponse, LogEntry};
use herald_error::{LoopError, LoopErrorKind};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where the loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LoopState {
    /// Not running and nothing in flight
    Idle,
    /// A cycle's network call is in flight
    RunningCycle,
    /// Running, waiting for the next tick
    ScheduledWait,
}

/// Side effects the runtime performs on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run one cycle with this request and report back when it finishes
    StartCycle(AutomationRequest),
    /// Replace any existing timer with one ticking every interval
    ArmTimer(Duration),
    /// Drop the timer
    CancelTimer,
}

/// How a cycle ended, as seen by the loop.
pub type CycleOutcome = Result<AutomationResponse, String>;

/// Point-in-time view of the loop for display.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopStatus {
    /// Current state
    state: LoopState,
    /// Whether the loop reschedules after each cycle
    is_running: bool,
    /// Whether a cycle is in flight
    is_loading: bool,
    /// When the next scheduled cycle is due
    next_run_at: Option<DateTime<Utc>>,
    /// Interval of the stored configuration, in minutes
    interval_minutes: Option<u32>,
    /// Most recent successful response
    last_response: Option<AutomationResponse>,
    /// Most recent failure message
    last_error: Option<String>,
}

/// Loop state, stored configuration and rolling log.
#[derive(Debug, Clone, Default)]
pub struct LoopController {
    config: Option<AutomationRequest>,
    running: bool,
    loading: bool,
    next_run_at: Option<DateTime<Utc>>,
    last_response: Option<AutomationResponse>,
    last_error: Option<String>,
    log: ActivityLog,
}

impl LoopController {
    /// An idle controller with no configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An idle controller holding a previously saved configuration.
    pub fn with_config(config: AutomationRequest) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        match (self.loading, self.running) {
            (true, _) => LoopState::RunningCycle,
            (false, true) => LoopState::ScheduledWait,
            (false, false) => LoopState::Idle,
        }
    }

    /// Stored configuration, if any.
    pub fn config(&self) -> Option<&AutomationRequest> {
        self.config.as_ref()
    }

    /// Whether the loop is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a cycle is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Rolling log, oldest first.
    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Snapshot for display.
    pub fn status(&self) -> LoopStatus {
        LoopStatus {
            state: self.state(),
            is_running: self.running,
            is_loading: self.loading,
            next_run_at: self.next_run_at,
            interval_minutes: self.config.as_ref().map(|c| *c.schedule().interval_minutes()),
            last_response: self.last_response.clone(),
            last_error: self.last_error.clone(),
        }
    }

    /// Log entries as a vector, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.log.to_vec()
    }

    fn record(&mut self, now: DateTime<Utc>, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "Loop log");
        self.log.push(now, message);
    }

    fn interval(&self) -> Option<Duration> {
        self.config.as_ref().map(|c| c.schedule().interval())
    }

    fn schedule_from(&mut self, now: DateTime<Utc>) {
        self.next_run_at = self
            .config
            .as_ref()
            .map(|c| now + c.schedule().chrono_interval());
    }

    /// Stores `request` and runs it once now.
    ///
    /// Does not change whether the loop is running. Dropped with a log entry
    /// when a cycle is already in flight.
    pub fn submit(&mut self, request: AutomationRequest, now: DateTime<Utc>) -> Vec<Command> {
        self.config = Some(request.clone());
        if self.loading {
            self.record(now, "Manual run skipped: a cycle is already in flight");
            return Vec::new();
        }
        self.loading = true;
        self.record(now, format!("Manual run started: {}", request.brief().topic()));
        vec![Command::StartCycle(request.with_run_now(true))]
    }

    /// Starts the loop with the stored configuration.
    ///
    /// Runs a cycle immediately and arms the timer. When a cycle is already
    /// in flight only the immediate run is skipped; the loop still starts.
    ///
    /// # Errors
    ///
    /// [`LoopErrorKind::ConfigurationMissing`] when nothing has been submitted yet.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<Vec<Command>, LoopError> {
        let Some(config) = self.config.clone() else {
            self.record(now, "Start failed: no configuration has been submitted");
            return Err(LoopError::new(LoopErrorKind::ConfigurationMissing));
        };
        if self.loading && self.running {
            self.record(now, "Start skipped: loop is already running");
            return Ok(Vec::new());
        }

        self.running = true;
        self.schedule_from(now);
        let minutes = *config.schedule().interval_minutes();
        self.record(now, format!("Loop started: every {} minutes", minutes));
        info!(interval_minutes = minutes, "Automation loop started");

        let arm = Command::ArmTimer(config.schedule().interval());
        if self.loading {
            self.record(now, "Start: immediate run skipped, cycle in flight");
            return Ok(vec![arm]);
        }
        self.loading = true;
        Ok(vec![Command::StartCycle(config.with_run_now(true)), arm])
    }

    /// Stops the loop. An in-flight cycle finishes but does not reschedule.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Vec<Command> {
        let was_running = self.running;
        self.running = false;
        self.next_run_at = None;
        if was_running {
            self.record(now, "Loop stopped");
            info!("Automation loop stopped");
        }
        vec![Command::CancelTimer]
    }

    /// Replaces the stored configuration; the next cycle uses it.
    ///
    /// A changed interval re-arms the timer at once while the loop waits.
    /// Mid-cycle it takes effect when the cycle finishes and re-arms.
    pub fn reconfigure(&mut self, request: AutomationRequest, now: DateTime<Utc>) -> Vec<Command> {
        let minutes = *request.schedule().interval_minutes();
        let changed = self.interval() != Some(request.schedule().interval());
        self.config = Some(request);
        self.record(now, format!("Configuration updated: every {} minutes", minutes));

        if !changed || self.state() != LoopState::ScheduledWait {
            return Vec::new();
        }
        self.schedule_from(now);
        self.interval().map(Command::ArmTimer).into_iter().collect()
    }

    /// The timer fired.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Command> {
        if !self.running {
            debug!("Tick ignored: loop is not running");
            return Vec::new();
        }
        let Some(config) = self.config.clone() else {
            return Vec::new();
        };

        // The timer keeps its cadence either way.
        self.schedule_from(now);
        if self.loading {
            self.record(now, "Scheduled run skipped: previous cycle still in flight");
            warn!("Scheduled run skipped: previous cycle still in flight");
            return Vec::new();
        }

        self.loading = true;
        self.record(now, "Scheduled run started");
        vec![Command::StartCycle(config.with_run_now(false))]
    }

    /// A cycle finished, successfully or not.
    ///
    /// Logs one line per platform and reschedules when the loop is running.
    pub fn cycle_finished(&mut self, outcome: CycleOutcome, now: DateTime<Utc>) -> Vec<Command> {
        self.loading = false;
        match outcome {
            Ok(response) => {
                for result in response.platform_results() {
                    self.record(now, result.to_string());
                }
                self.record(
                    now,
                    format!(
                        "Cycle complete: {}/{} published",
                        response.published_count(),
                        response.platform_results().len()
                    ),
                );
                self.last_error = None;
                self.last_response = Some(response);
            }
            Err(message) => {
                self.record(now, format!("Cycle failed: {}", message));
                self.last_error = Some(message);
            }
        }

        if !self.running {
            return Vec::new();
        }
        self.schedule_from(now);
        match self.interval() {
            Some(interval) => vec![Command::ArmTimer(interval)],
            None => Vec::new(),
        }
    }
}
