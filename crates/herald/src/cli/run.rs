//! One-shot run command handler.

use super::setup::{read_request, run_client};
use herald_bot::describe_failure;
use std::path::PathBuf;

/// Handle the `run` command: one cycle, response printed as JSON.
#[tracing::instrument(skip_all, fields(request = %request.display()))]
pub async fn handle_run_command(
    request: PathBuf,
    server: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = read_request(&request)?.with_run_now(true);
    let client = run_client(server.as_deref())?;

    match client.run(&request).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            for result in response.platform_results() {
                eprintln!("{}", result);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Cycle failed: {}", describe_failure(&e));
            Err(e.into())
        }
    }
}
