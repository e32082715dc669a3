// MyQ HTTP client
//
// Wraps `reqwest::Client` with MyQ URL construction, application-id and
// token injection, and `ReturnCode` envelope checking. Endpoint groups
// (auth, devices) are implemented as inherent methods in sibling files.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::myq::models::Envelope;
use crate::transport::TransportConfig;

/// Public cloud endpoint of the MyQ service.
pub const DEFAULT_BASE_URL: &str = "https://myqexternal.myqdevice.com";

/// Application id shared by every MyQ API consumer.
pub const DEFAULT_APP_ID: &str =
    "Vj8pQggXLhLy0WHahglCD4N1nAkkXQtGYpq2HrHD7H1nvmbT55KqtN6RSF4ILB/i";

pub const DEFAULT_CULTURE: &str = "en";

/// Raw HTTP client for the MyQ door service.
///
/// Stateless with respect to authentication: every call takes the security
/// token explicitly, so session caching lives with the caller.
pub struct MyqClient {
    http: reqwest::Client,
    base_url: Url,
    app_id: String,
    culture: String,
}

impl MyqClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(
        base_url: Url,
        app_id: String,
        culture: String,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, app_id, culture))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        app_id: String,
        culture: String,
    ) -> Self {
        Self {
            http,
            base_url,
            app_id,
            culture,
        }
    }

    pub(crate) fn culture(&self) -> &str {
        &self.culture
    }

    // ── URL builders ─────────────────────────────────────────────────

    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET with `appId`/`securityToken` appended to `params` and
    /// check the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        token: &str,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {}", url.path());

        let resp = self
            .http
            .get(url)
            .query(params)
            .query(&[("appId", self.app_id.as_str()), ("securityToken", token)])
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Send a form-encoded PUT with `ApplicationId`/`SecurityToken` added to
    /// `form` and check the envelope.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
        token: &str,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {}", url.path());

        let mut body: Vec<(&str, &str)> = form.to_vec();
        body.push(("ApplicationId", self.app_id.as_str()));
        body.push(("SecurityToken", token));

        let resp = self
            .http
            .put(url)
            .form(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Check `ReturnCode`, then decode the same body as `T`.
    async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| Error::deserialization(e, &body))?;

        if !envelope.is_ok() {
            return Err(Error::Api {
                message: envelope
                    .error_message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| format!("ReturnCode={}", envelope.return_code)),
                code: envelope.return_code,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::deserialization(e, &body))
    }
}
