//! Serve command handler.

use super::setup::local_orchestrator;
use herald_error::HeraldResult;
use herald_server::ServerConfig;
use std::path::PathBuf;
use tracing::info;

/// Handle the `serve` command.
#[tracing::instrument(skip_all)]
pub async fn handle_serve_command(config: Option<PathBuf>, bind: Option<String>) -> HeraldResult<()> {
    let mut server_config = ServerConfig::load(config.as_deref())?;
    if let Some(bind) = bind {
        server_config = server_config.with_bind(bind);
    }
    info!(
        bind = %server_config.bind(),
        default_media_url = server_config.default_media_url().is_some(),
        "Starting Herald server"
    );

    let orchestrator = local_orchestrator(server_config.default_media_url().clone())?;
    herald_server::serve(&server_config, orchestrator).await
}
