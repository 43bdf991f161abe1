//! Herald command-line entry point.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }
    herald_core::init_tracing();
    if let Err(e) = herald_core::init_observability("herald", 60) {
        warn!(error = %e, "Metrics disabled");
    }
    debug!(command = ?args.command, "Parsed arguments");

    match args.command {
        Commands::Serve { config, bind } => cli::handle_serve_command(config, bind).await?,
        Commands::Run { request, server } => cli::handle_run_command(request, server).await?,
        Commands::Loop {
            request,
            server,
            autostart,
            no_cache,
        } => cli::handle_loop_command(request, server, autostart, no_cache).await?,
        Commands::Validate { request, format } => cli::handle_validate_command(request, format)?,
    }

    Ok(())
}
