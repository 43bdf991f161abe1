//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Herald: language-model copy, published on a schedule.
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Generate marketing copy and publish it to Meta, Instagram and LinkedIn")]
#[command(version)]
pub struct Cli {
    /// Environment file to load before anything else
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the run endpoint over HTTP
    Serve {
        /// Server configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Address to bind, overrides the file and HERALD_BIND
        #[arg(long)]
        bind: Option<String>,
    },

    /// Run one cycle and print the response
    Run {
        /// Request file (JSON)
        request: PathBuf,

        /// Herald server base URL; runs in-process when omitted
        #[arg(long)]
        server: Option<String>,
    },

    /// Run the automation loop, controlled from stdin
    Loop {
        /// Request file (JSON); falls back to the cached configuration
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Herald server base URL; runs in-process when omitted
        #[arg(long)]
        server: Option<String>,

        /// Start the loop immediately instead of waiting for `start`
        #[arg(long)]
        autostart: bool,

        /// Do not read or write the configuration cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Check a request file without running it
    Validate {
        /// Request file (JSON)
        request: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format for `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// The normalized request, or the error body the server would return
    Json,
}
