//! Validate command handler.

use super::OutputFormat;
use super::setup::{read_json, validator};
use serde_json::json;
use std::path::PathBuf;

/// Handle the `validate` command.
///
/// Exits with status 1 when the request would be rejected.
#[tracing::instrument(skip_all, fields(request = %request.display()))]
pub fn handle_validate_command(
    request: PathBuf,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_json(&request)?;
    let result = validator(None).validate(&value);

    match (&result, format) {
        (Ok(normalized), OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(normalized)?);
        }
        (Err(e), OutputFormat::Json) => {
            let body = json!({ "error": "Invalid payload", "details": e.details });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        (Ok(normalized), OutputFormat::Human) => {
            println!("✓ {} is valid", request.display());
            println!("  topic: {}", normalized.brief().topic());
            let enabled = normalized.platforms().enabled();
            if enabled.is_empty() {
                println!("  platforms: none enabled (every platform will be skipped)");
            } else {
                let names: Vec<&str> = enabled.iter().map(|p| p.label()).collect();
                println!("  platforms: {}", names.join(", "));
            }
            println!(
                "  interval: every {} minutes",
                normalized.schedule().interval_minutes()
            );
        }
        (Err(e), OutputFormat::Human) => {
            println!("✗ {} is invalid", request.display());
            for detail in &e.details {
                println!("  - {}", detail);
            }
        }
    }

    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
