//! Loop command handler.

use super::setup::{read_request, run_client};
use herald_bot::{AutomationArgs, AutomationLoop, ConfigCache, LoopStatus};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const HELP: &str = "commands: start | stop | run | reload | status | log | quit";

fn print_status(status: &LoopStatus) {
    println!("state: {}", status.state());
    match status.next_run_at() {
        Some(at) => println!("next run: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("next run: -"),
    }
    if let Some(minutes) = status.interval_minutes() {
        println!("interval: {} minutes", minutes);
    }
    if let Some(response) = status.last_response() {
        println!("last cycle: {}", response.content().title());
        for result in response.platform_results() {
            println!("  {}", result);
        }
    }
    if let Some(error) = status.last_error() {
        println!("last error: {}", error);
    }
}

/// Handle the `loop` command.
///
/// Reads one command per line from stdin until `quit` or end of input.
#[tracing::instrument(skip_all)]
pub async fn handle_loop_command(
    request: Option<PathBuf>,
    server: Option<String>,
    autostart: bool,
    no_cache: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let initial = request.as_deref().map(read_request).transpose()?;
    let client = run_client(server.as_deref())?;
    let cache = if no_cache {
        None
    } else {
        ConfigCache::default_location()
    };
    if let Some(cache) = &cache {
        info!(path = %cache.path().display(), "Using configuration cache");
    }

    let args = AutomationArgs::builder()
        .client(client)
        .cache(cache)
        .initial(initial)
        .build();
    let automation = AutomationLoop::spawn(args).await?;

    if autostart {
        if let Err(e) = automation.start().await {
            eprintln!("{}", e);
        }
    }
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = match line.trim() {
            "" => Ok(()),
            "start" => automation.start().await,
            "stop" => automation.stop(),
            "run" | "reload" => match &request {
                Some(path) => match read_request(path) {
                    Ok(updated) if line.trim() == "run" => automation.submit(updated),
                    Ok(updated) => automation.reconfigure(updated),
                    Err(e) => {
                        eprintln!("{}", e);
                        Ok(())
                    }
                },
                None => {
                    eprintln!("no request file given; start herald loop with --request");
                    Ok(())
                }
            },
            "status" => automation.status().await.map(|status| print_status(&status)),
            "log" => automation.log().await.map(|entries| {
                for entry in entries {
                    println!("{}", entry);
                }
            }),
            "quit" | "exit" => break,
            other => {
                println!("unknown command '{}'; {}", other, HELP);
                Ok(())
            }
        };
        if let Err(e) = outcome {
            warn!(error = %e, "Loop command failed");
            eprintln!("{}", e);
        }
    }

    automation.shutdown().await?;
    Ok(())
}
