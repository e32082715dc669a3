//! Shared configuration for the doorsync binary.
//!
//! A single TOML file layered under `DOORSYNC_*` environment variables,
//! credential resolution (env + keyring + plaintext), and translation to
//! `doorsync_core::BridgeConfig`. Core never sees these types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use doorsync_api::myq::{DEFAULT_APP_ID, DEFAULT_BASE_URL, DEFAULT_CULTURE};
use doorsync_core::{
    BridgeConfig, ControllerConfig, Credentials, DEFAULT_SESSION_VALIDITY, DoorServiceConfig,
};

/// Keyring service name for stored passwords.
pub const KEYRING_SERVICE: &str = "doorsync";

/// Prefix for environment overrides, e.g. `DOORSYNC_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "DOORSYNC_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for [{section}]")]
    NoCredentials { section: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Per-request timeout for both upstreams.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub door_service: DoorServiceSection,

    #[serde(default)]
    pub controller: ControllerSection,

    #[serde(default)]
    pub server: ServerSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            door_service: DoorServiceSection::default(),
            controller: ControllerSection::default(),
            server: ServerSection::default(),
        }
    }
}

/// `[door_service]`: the cloud account owning the doors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DoorServiceSection {
    pub username: Option<String>,

    /// Plaintext password (prefer keyring or env var).
    pub password: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_app_id")]
    pub app_id: String,

    #[serde(default = "default_culture")]
    pub culture: String,

    /// How long a login token is reused.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u64,
}

impl Default for DoorServiceSection {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            base_url: default_base_url(),
            app_id: default_app_id(),
            culture: default_culture(),
            session_minutes: default_session_minutes(),
        }
    }
}

/// `[controller]`: the local automation controller holding the variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControllerSection {
    /// Hostname or IP. A value containing `://` is used as the full base URL.
    pub host: Option<String>,

    #[serde(default = "default_controller_port")]
    pub port: u16,

    pub username: Option<String>,

    /// Plaintext password (prefer keyring or env var).
    pub password: Option<String>,

    /// Prepended to the door name to form the variable name.
    #[serde(default)]
    pub var_prefix: String,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ControllerSection {
    fn default() -> Self {
        Self {
            host: None,
            port: default_controller_port(),
            username: None,
            password: None,
            var_prefix: String::new(),
            enabled: true,
        }
    }
}

/// `[server]`: where `doorsync serve` listens.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSection {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_app_id() -> String {
    DEFAULT_APP_ID.into()
}
fn default_culture() -> String {
    DEFAULT_CULTURE.into()
}
fn default_session_minutes() -> u64 {
    DEFAULT_SESSION_VALIDITY.as_secs() / 60
}
fn default_controller_port() -> u16 {
    80
}
fn default_true() -> bool {
    true
}
fn default_server_host() -> String {
    "0.0.0.0".into()
}
fn default_server_port() -> u16 {
    5000
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "doorsync", "doorsync").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("doorsync");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Layered provider: defaults → TOML file → environment.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from `path` (or the default path) plus environment.
/// A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    Ok(figment(&path).extract()?)
}

// ── Credential resolution ───────────────────────────────────────────

/// Which stored password an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordSlot {
    DoorService,
    Controller,
}

impl PasswordSlot {
    pub fn env_var(self) -> &'static str {
        match self {
            Self::DoorService => "DOORSYNC_DOOR_PASSWORD",
            Self::Controller => "DOORSYNC_CONTROLLER_PASSWORD",
        }
    }

    /// Keyring account name under [`KEYRING_SERVICE`].
    pub fn keyring_user(self) -> &'static str {
        match self {
            Self::DoorService => "door_service/password",
            Self::Controller => "controller/password",
        }
    }

    pub fn section(self) -> &'static str {
        match self {
            Self::DoorService => "door_service",
            Self::Controller => "controller",
        }
    }
}

/// Resolve a password: env var → keyring → plaintext in config.
pub fn resolve_password(cfg: &Config, slot: PasswordSlot) -> Result<SecretString, ConfigError> {
    if let Ok(pw) = std::env::var(slot.env_var()) {
        return Ok(SecretString::from(pw));
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, slot.keyring_user()) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    let plaintext = match slot {
        PasswordSlot::DoorService => cfg.door_service.password.as_ref(),
        PasswordSlot::Controller => cfg.controller.password.as_ref(),
    };
    plaintext
        .map(|pw| SecretString::from(pw.clone()))
        .ok_or_else(|| ConfigError::NoCredentials {
            section: slot.section().into(),
        })
}

/// Store a password in the OS keyring.
pub fn store_password(slot: PasswordSlot, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, slot.keyring_user())?;
    entry.set_password(password)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

impl Config {
    /// Controller base URL built from `host` and `port`.
    pub fn controller_url(&self) -> Result<url::Url, ConfigError> {
        let host = self
            .controller
            .host
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ConfigError::Validation {
                field: "controller.host".into(),
                reason: "required while the controller is enabled".into(),
            })?;

        let raw = if host.contains("://") {
            host.to_owned()
        } else {
            format!("http://{host}:{}", self.controller.port)
        };
        raw.parse().map_err(|_| ConfigError::Validation {
            field: "controller.host".into(),
            reason: format!("invalid URL: {raw}"),
        })
    }

    /// Build the core configuration, resolving credentials along the way.
    pub fn to_bridge_config(&self) -> Result<BridgeConfig, ConfigError> {
        let door = &self.door_service;
        let base_url = door.base_url.parse().map_err(|_| ConfigError::Validation {
            field: "door_service.base_url".into(),
            reason: format!("invalid URL: {}", door.base_url),
        })?;
        let session_secs = door
            .session_minutes
            .checked_mul(60)
            .ok_or_else(|| ConfigError::Validation {
                field: "door_service.session_minutes".into(),
                reason: format!("{} minutes is out of range", door.session_minutes),
            })?;
        let username = door
            .username
            .clone()
            .ok_or_else(|| ConfigError::NoCredentials {
                section: PasswordSlot::DoorService.section().into(),
            })?;
        let password = resolve_password(self, PasswordSlot::DoorService)?;

        let controller = if self.controller.enabled {
            ControllerConfig {
                base_url: self.controller_url()?,
                credentials: Credentials {
                    username: self.controller.username.clone().unwrap_or_default(),
                    password: resolve_password(self, PasswordSlot::Controller)?,
                },
                var_prefix: self.controller.var_prefix.clone(),
                enabled: true,
            }
        } else {
            // Never contacted while disabled.
            ControllerConfig {
                base_url: self.controller_url().or_else(|_| placeholder_url())?,
                credentials: Credentials {
                    username: String::new(),
                    password: SecretString::from(String::new()),
                },
                var_prefix: self.controller.var_prefix.clone(),
                enabled: false,
            }
        };

        Ok(BridgeConfig {
            door_service: DoorServiceConfig {
                base_url,
                app_id: door.app_id.clone(),
                culture: door.culture.clone(),
                credentials: Credentials { username, password },
                session_validity: Duration::from_secs(session_secs),
            },
            controller,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

fn placeholder_url() -> Result<url::Url, ConfigError> {
    "http://127.0.0.1/"
        .parse()
        .map_err(|e: url::ParseError| ConfigError::Validation {
            field: "controller.host".into(),
            reason: e.to_string(),
        })
}
