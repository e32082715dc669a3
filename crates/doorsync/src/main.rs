mod cli;
mod commands;
mod error;
mod output;
mod server;
mod view;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use doorsync_config::Config;
use doorsync_core::DoorBridge;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands never touch the network
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "doorsync", &mut std::io::stdout());
            Ok(())
        }

        Command::Serve(args) => {
            let (cfg, bridge) = connect(&cli.global)?;
            commands::serve::handle(bridge, args, &cfg).await
        }

        Command::Doors(args) => {
            let (_, bridge) = connect(&cli.global)?;
            tracing::debug!(command = ?args.command, "dispatching door command");
            commands::doors::handle(&bridge, args, &cli.global).await
        }
    }
}

/// Load configuration and wire up the bridge. No network calls yet.
fn connect(global: &GlobalOpts) -> Result<(Config, DoorBridge), CliError> {
    let cfg = doorsync_config::load_config(global.config.as_deref())?;
    let bridge = DoorBridge::new(&cfg.to_bridge_config()?)?;
    Ok((cfg, bridge))
}
