//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the herald binary.

mod automation;
mod commands;
mod run;
mod serve;
mod setup;
mod validate;

pub use automation::handle_loop_command;
pub use commands::{Cli, Commands, OutputFormat};
pub use run::handle_run_command;
pub use serve::handle_serve_command;
pub use validate::handle_validate_command;
