// ── Core error types ──
//
// User-facing errors from doorsync-core. Consumers never see raw HTTP
// statuses or decode failures from doorsync-api; the conversions below
// translate them depending on which upstream service produced them.

use thiserror::Error;

use crate::model::{DesiredState, DoorState};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Door service ─────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailure { message: String },

    #[error("Door service error: {message}")]
    Upstream {
        message: String,
        /// The request never reached the service.
        unreachable: bool,
    },

    #[error("Door not found: {identifier}")]
    DoorNotFound { identifier: String },

    #[error("Invalid state specified: {input:?} (expected \"open\" or \"close\")")]
    InvalidState { input: String },

    #[error("{door} already {}", already_label(.desired))]
    AlreadyInState {
        door: String,
        state: DoorState,
        desired: DesiredState,
    },

    #[error("Command rejected by door service: {message}")]
    CommandRejected { message: String },

    // ── Automation controller ────────────────────────────────────────
    #[error("State variable {variable} not found in controller variable list")]
    BindingNotFound { variable: String },

    #[error("Cannot reach controller at {url}: {reason}")]
    ControllerUnreachable { url: String, reason: String },

    #[error("Controller error: {message}")]
    ControllerProtocol { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn already_label(desired: &DesiredState) -> &'static str {
    match desired {
        DesiredState::Open => "open",
        DesiredState::Close => "closed",
    }
}

impl CoreError {
    /// Numeric code carried in structured error responses.
    pub fn code(&self) -> u16 {
        match self {
            Self::Upstream {
                unreachable: true, ..
            }
            | Self::ControllerUnreachable { .. } => 2,
            Self::DoorNotFound { .. } => 3,
            Self::Config { .. } => 4,
            Self::AlreadyInState {
                desired: DesiredState::Open,
                ..
            } => 5,
            Self::AlreadyInState {
                desired: DesiredState::Close,
                ..
            } => 6,
            Self::InvalidState { .. } => 7,
            Self::BindingNotFound { .. } => 8,
            Self::AuthenticationFailure { .. }
            | Self::Upstream { .. }
            | Self::CommandRejected { .. }
            | Self::ControllerProtocol { .. } => 1,
        }
    }

    pub(crate) fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            unreachable: false,
        }
    }

    /// Translate an error from the automation controller client.
    pub fn from_controller(err: doorsync_api::Error) -> Self {
        match err {
            doorsync_api::Error::Transport(ref e) => CoreError::ControllerUnreachable {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), |u| u.origin().ascii_serialization()),
                reason: e.to_string(),
            },
            doorsync_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid controller URL: {e}"),
            },
            other => CoreError::ControllerProtocol {
                message: other.to_string(),
            },
        }
    }
}

// ── Conversion from door-service errors ──────────────────────────────

impl From<doorsync_api::Error> for CoreError {
    fn from(err: doorsync_api::Error) -> Self {
        match err {
            doorsync_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailure { message }
            }
            ref e @ doorsync_api::Error::Transport(_) => CoreError::Upstream {
                message: e.to_string(),
                unreachable: e.is_unreachable(),
            },
            doorsync_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid door service URL: {e}"),
            },
            doorsync_api::Error::ClientSetup(message) => CoreError::Config { message },
            doorsync_api::Error::Api { message, .. } => CoreError::upstream(message),
            other @ (doorsync_api::Error::Status { .. }
            | doorsync_api::Error::Deserialization { .. }) => {
                CoreError::upstream(other.to_string())
            }
        }
    }
}
