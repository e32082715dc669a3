//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use doorsync_config::ConfigError;
use doorsync_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach {target}")]
    #[diagnostic(
        code(doorsync::connection_failed),
        help("Check network access and the configured address.\nReason: {reason}")
    )]
    ConnectionFailed { target: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Door service authentication failed: {message}")]
    #[diagnostic(
        code(doorsync::auth_failed),
        help(
            "Verify [door_service].username and the password.\n\
             Run: doorsync config set-password door-service"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for [{section}]")]
    #[diagnostic(
        code(doorsync::no_credentials),
        help(
            "Create a config with: doorsync config init\n\
             Or set DOORSYNC_DOOR_SERVICE__USERNAME and DOORSYNC_DOOR_PASSWORD."
        )
    )]
    NoCredentials { section: String },

    // ── Doors ────────────────────────────────────────────────────────
    #[error("Door '{identifier}' not found")]
    #[diagnostic(
        code(doorsync::not_found),
        help("Run: doorsync doors list to see available doors")
    )]
    DoorNotFound { identifier: String },

    #[error("{message}")]
    #[diagnostic(code(doorsync::already_in_state))]
    AlreadyInState { message: String },

    #[error("Invalid state '{input}'")]
    #[diagnostic(code(doorsync::invalid_state), help("Expected \"open\" or \"close\"."))]
    InvalidState { input: String },

    #[error("State variable '{variable}' not found on the controller")]
    #[diagnostic(
        code(doorsync::binding_not_found),
        help(
            "Create a state variable named {variable} on the controller,\n\
             or disable sync with [controller].enabled = false."
        )
    )]
    BindingNotFound { variable: String },

    // ── Upstream ─────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(doorsync::upstream))]
    Upstream { message: String },

    // ── Server ───────────────────────────────────────────────────────
    #[error("Door registry failed to load at startup")]
    #[diagnostic(code(doorsync::startup))]
    Startup {
        #[source]
        source: CoreError,
    },

    #[error("Failed to bind {addr}")]
    #[diagnostic(code(doorsync::bind))]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(doorsync::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(doorsync::config),
        help("Inspect the effective settings with: doorsync config show")
    )]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    #[diagnostic(code(doorsync::json))]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization failed: {0}")]
    #[diagnostic(code(doorsync::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::DoorNotFound { .. } | Self::BindingNotFound { .. } => exit_code::NOT_FOUND,
            Self::AlreadyInState { .. } => exit_code::CONFLICT,
            Self::InvalidState { .. } | Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::AuthenticationFailure { message } => CliError::AuthFailed { message },

            CoreError::Upstream {
                message,
                unreachable: true,
            } => CliError::ConnectionFailed {
                target: "the door service".into(),
                reason: message,
            },

            CoreError::ControllerUnreachable { url, reason } => CliError::ConnectionFailed {
                target: format!("controller at {url}"),
                reason,
            },

            CoreError::DoorNotFound { identifier } => CliError::DoorNotFound { identifier },

            CoreError::InvalidState { input } => CliError::InvalidState { input },

            CoreError::AlreadyInState { .. } => CliError::AlreadyInState { message },

            CoreError::BindingNotFound { variable } => CliError::BindingNotFound { variable },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Upstream { .. }
            | CoreError::CommandRejected { .. }
            | CoreError::ControllerProtocol { .. } => CliError::Upstream { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { section } => CliError::NoCredentials { section },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}
