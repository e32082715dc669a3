//! Config subcommand handlers.

use std::path::PathBuf;

use doorsync_config::{self as config, Config, PasswordSlot};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat, PasswordTarget};
use crate::error::CliError;
use crate::output;

/// Starter file written by `config init`.
const TEMPLATE: &str = r#"# doorsync configuration
#
# Every key can be overridden from the environment, e.g.
#   DOORSYNC_SERVER__PORT=8080
# Passwords resolve from DOORSYNC_DOOR_PASSWORD / DOORSYNC_CONTROLLER_PASSWORD,
# then the system keyring (doorsync config set-password ...), then this file.

timeout_secs = 30

[door_service]
username = "you@example.com"
# password = ""
session_minutes = 30

[controller]
host = "192.168.1.20"
port = 80
username = "admin"
# password = ""
var_prefix = "garage_"
enabled = true

[server]
host = "0.0.0.0"
port = 5000
"#;

const REDACTED: &str = "****";

fn target_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config::config_path)
}

/// Copy of `cfg` with every plaintext password masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    if cfg.door_service.password.is_some() {
        cfg.door_service.password = Some(REDACTED.into());
    }
    if cfg.controller.password.is_some() {
        cfg.controller.password = Some(REDACTED.into());
    }
    cfg
}

fn slot(target: PasswordTarget) -> PasswordSlot {
    match target {
        PasswordTarget::DoorService => PasswordSlot::DoorService,
        PasswordTarget::Controller => PasswordSlot::Controller,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config(global.config.as_deref())?);
            let out = match global.output {
                OutputFormat::Json => serde_json::to_string_pretty(&cfg)?,
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&cfg)?,
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&target_path(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = target_path(global);
            if path.exists() && !force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!("{} already exists (use --force to overwrite)", path.display()),
                });
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, TEMPLATE)?;
            if !global.quiet {
                eprintln!("✓ wrote {}", path.display());
            }
            Ok(())
        }

        ConfigCommand::SetPassword { target } => {
            let slot = slot(target);
            let password = rpassword::prompt_password(format!("{} password: ", slot.section()))?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            config::store_password(slot, &password)?;
            if !global.quiet {
                eprintln!("✓ {} password stored in system keyring", slot.section());
            }
            Ok(())
        }
    }
}
