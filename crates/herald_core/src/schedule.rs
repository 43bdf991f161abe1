//! Re-run schedule carried by each request.

use derive_getters::Getters;
use serde::Serialize;
use std::time::Duration;

/// Shortest interval the loop may run at, in minutes.
pub const MIN_INTERVAL_MINUTES: u32 = 15;

/// Interval used when a request does not specify one, in minutes.
pub const DEFAULT_INTERVAL_MINUTES: u32 = 60;

/// Clamps a requested interval to the supported range.
///
/// # Examples
///
/// ```
/// use herald_core::normalize_interval;
///
/// assert_eq!(normalize_interval(5), 15);
/// assert_eq!(normalize_interval(360), 360);
/// ```
pub fn normalize_interval(requested_minutes: i64) -> u32 {
    let floored = requested_minutes.max(i64::from(MIN_INTERVAL_MINUTES));
    u32::try_from(floored).unwrap_or(u32::MAX)
}

/// How often the loop re-runs and whether this invocation is a manual one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Normalized interval in minutes, never below [`MIN_INTERVAL_MINUTES`].
    interval_minutes: u32,
    /// True for manual submits and starts, false for scheduled re-runs.
    run_now: bool,
}

impl Schedule {
    /// Creates a schedule, clamping the interval.
    pub fn new(requested_minutes: i64, run_now: bool) -> Self {
        Self {
            interval_minutes: normalize_interval(requested_minutes),
            run_now,
        }
    }

    /// Interval as a duration.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.interval_minutes) * 60)
    }

    /// Interval as a chrono duration, for timestamp arithmetic.
    pub fn chrono_interval(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.interval_minutes))
    }

    /// Copy of this schedule with a different `run_now` flag.
    pub fn with_run_now(self, run_now: bool) -> Self {
        Self { run_now, ..self }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(i64::from(DEFAULT_INTERVAL_MINUTES), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_is_floored() {
        for (requested, expected) in [(-3, 15), (0, 15), (5, 15), (15, 15), (16, 16), (360, 360)] {
            assert_eq!(Schedule::new(requested, true).interval_minutes, expected);
        }
    }

    #[test]
    fn test_interval_duration() {
        let schedule = Schedule::new(10, false);
        assert_eq!(schedule.interval(), Duration::from_secs(15 * 60));
        assert_eq!(schedule.chrono_interval(), chrono::Duration::minutes(15));
        assert!(!schedule.run_now);
        assert!(schedule.with_run_now(true).run_now);
    }

    #[test]
    fn test_oversized_interval_saturates() {
        assert_eq!(normalize_interval(i64::MAX), u32::MAX);
    }
}
