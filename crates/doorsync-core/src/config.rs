// ── Runtime connection configuration ──
//
// These types describe *how* to reach the door service and the automation
// controller. They carry credential data and connection tuning, but never
// touch disk. The binary builds a `BridgeConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default session validity granted by the door service.
pub const DEFAULT_SESSION_VALIDITY: Duration = Duration::from_secs(30 * 60);

/// Username/password pair for one upstream service.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Door service (MyQ) connection settings.
#[derive(Debug, Clone)]
pub struct DoorServiceConfig {
    pub base_url: Url,
    pub app_id: String,
    pub culture: String,
    pub credentials: Credentials,
    /// How long a freshly issued token is trusted.
    pub session_validity: Duration,
}

/// Automation controller (ISY) connection settings.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller root, e.g. `http://192.168.1.20:80`.
    pub base_url: Url,
    pub credentials: Credentials,
    /// Prepended to the door name (spaces → underscores) to form the
    /// variable name.
    pub var_prefix: String,
    /// When false, publishing is a no-op.
    pub enabled: bool,
}

/// Everything the bridge needs to run.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub door_service: DoorServiceConfig,
    pub controller: ControllerConfig,
    /// Per-request HTTP timeout for both services.
    pub timeout: Duration,
}
