//! Core data types for Herald.
//!
//! This crate holds the shapes that flow through one automation cycle
//! (brief, credentials, schedule, generated content, per-platform results),
//! the schema validator that turns untrusted JSON into an
//! [`AutomationRequest`], the bounded activity log, and tracing setup.

mod brief;
mod content;
mod credential;
mod log;
mod observability;
mod outcome;
mod platform;
mod request;
mod schedule;
mod validate;

pub use brief::{ContentBrief, ContentBriefBuilder};
pub use content::{GeneratedContent, GeneratedContentBuilder};
pub use credential::{
    Credential, InstagramCredential, LinkedInCredential, MetaCredential, PlatformSetting,
    PlatformSettings,
};
pub use log::{ActivityLog, LOG_CAPACITY, LogEntry};
pub use observability::{MetricsExporter, init_observability, init_tracing};
pub use outcome::{AutomationResponse, PlatformResult};
pub use platform::Platform;
pub use request::AutomationRequest;
pub use schedule::{DEFAULT_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES, Schedule, normalize_interval};
pub use validate::RequestValidator;
