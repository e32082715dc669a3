// Shared transport configuration for building reqwest::Client instances.
//
// Both the MyQ and ISY clients share timeout and user-agent settings
// through this module, avoiding duplicated builder logic.

use std::time::Duration;

const USER_AGENT: &str = concat!("doorsync/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| crate::error::Error::ClientSetup(format!("failed to build HTTP client: {e}")))
    }
}
