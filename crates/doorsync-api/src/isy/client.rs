// ISY HTTP client
//
// Basic-auth REST calls against the automation controller. Responses are
// returned as (status, body) pairs so endpoint methods can decide which
// statuses are data conditions and which are failures.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the ISY REST interface.
pub struct IsyClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl IsyClient {
    /// Create a new client from a `TransportConfig`. `base_url` is the
    /// controller root, e.g. `http://192.168.1.20:80`.
    pub fn new(
        base_url: Url,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, username, password))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
        }
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// Authenticated GET returning the raw status and body.
    pub(crate) async fn call(&self, path: &str) -> Result<(StatusCode, String), Error> {
        let url = self.url(path)?;
        debug!("GET {}", url.path());

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        Ok((status, body))
    }
}
