//! Clap derive structures for the `doorsync` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// doorsync -- mirror garage door state into a home automation controller
#[derive(Debug, Parser)]
#[command(
    name = "doorsync",
    version,
    about = "Bridge garage doors into a home automation controller",
    long_about = "Reads and commands garage doors through the door service API and\n\
        mirrors each door's open/closed status into a controller state variable.\n\n\
        Run `doorsync serve` for the HTTP bridge, or use the `doors` commands directly.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "DOORSYNC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP bridge
    Serve(ServeArgs),

    /// Inspect and command doors
    #[command(alias = "d")]
    Doors(DoorsArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides [server].host)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides [server].port)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct DoorsArgs {
    #[command(subcommand)]
    pub command: DoorsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DoorsCommand {
    /// Refresh every door and sync it to the controller
    #[command(alias = "ls")]
    List,

    /// Show a door from the cache (name or id)
    Get { door: String },

    /// Refresh one door and sync it to the controller
    Status { door: String },

    /// Open a door
    Open { door: String },

    /// Close a door
    Close { door: String },
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration with secrets redacted
    Show,

    /// Print the config file path
    Path,

    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Store a password in the system keyring
    SetPassword {
        #[arg(value_enum)]
        target: PasswordTarget,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PasswordTarget {
    DoorService,
    Controller,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    pub shell: clap_complete::Shell,
}
