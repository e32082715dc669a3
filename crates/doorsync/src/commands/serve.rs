//! `serve` handler.

use doorsync_config::Config;
use doorsync_core::DoorBridge;

use crate::cli::ServeArgs;
use crate::error::CliError;
use crate::server;

pub async fn handle(bridge: DoorBridge, args: ServeArgs, cfg: &Config) -> Result<(), CliError> {
    let host = args.host.unwrap_or_else(|| cfg.server.host.clone());
    let port = args.port.unwrap_or(cfg.server.port);
    server::run(bridge, &format!("{host}:{port}")).await
}
