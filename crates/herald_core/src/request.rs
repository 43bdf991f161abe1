//! The unit of work passed from the automation loop to the orchestrator.

use crate::{ContentBrief, PlatformSettings, Schedule};
use derive_getters::Getters;
use serde::Serialize;

/// A validated, normalized automation request.
///
/// Only [`crate::RequestValidator`] produces these from untrusted input; the
/// serialized form is the wire format it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRequest {
    /// What to write about
    #[serde(flatten)]
    brief: ContentBrief,
    /// Where to publish
    platforms: PlatformSettings,
    /// When to run again
    schedule: Schedule,
}

impl AutomationRequest {
    /// Copy of this request marked as a manual (`true`) or scheduled (`false`) run.
    pub fn with_run_now(&self, run_now: bool) -> Self {
        Self {
            schedule: self.schedule.with_run_now(run_now),
            ..self.clone()
        }
    }
}
