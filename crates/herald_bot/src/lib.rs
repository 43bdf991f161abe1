//! Automation loop controller for Herald.
//!
//! The loop re-runs a stored [`herald_core::AutomationRequest`] on a fixed
//! interval, never with more than one cycle in flight, and keeps a rolling
//! activity log.
//!
//! - [`LoopController`]: the state machine, free of I/O
//! - [`AutomationActor`]: ractor actor that owns the controller and a timer
//! - [`AutomationLoop`]: handle for talking to the actor
//! - [`RunClient`]: how cycles reach the run endpoint, over HTTP or in-process
//! - [`ConfigCache`]: last submitted configuration on disk

mod actor;
mod cache;
mod client;
mod controller;
mod handle;

pub use actor::{AutomationActor, AutomationArgs, AutomationMessage, AutomationState};
pub use cache::ConfigCache;
pub use client::{HttpRunClient, LocalRunClient, RunClient, describe_failure};
pub use controller::{Command, CycleOutcome, LoopController, LoopState, LoopStatus};
pub use handle::AutomationLoop;
