// MyQ authentication
//
// Username/password exchange for a security token. The token itself is
// not cached here; `doorsync-core` owns its lifetime.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::Error;
use crate::myq::client::MyqClient;
use crate::myq::models::LoginResponse;

/// Token placeholder the login endpoint expects before a session exists.
const NO_TOKEN: &str = "null";

impl MyqClient {
    /// Authenticate and return a fresh security token.
    ///
    /// `GET /Membership/ValidateUserWithCulture`
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<String, Error> {
        debug!(username, "logging in to MyQ");

        let params = [
            ("username", username),
            ("password", password.expose_secret()),
            ("culture", self.culture()),
        ];

        let resp: LoginResponse = self
            .get("/Membership/ValidateUserWithCulture", &params, NO_TOKEN)
            .await
            .map_err(|e| match e {
                Error::Api { message, .. } => Error::Authentication { message },
                Error::Status { status, body } => Error::Authentication {
                    message: format!("login failed (HTTP {status}): {body}"),
                },
                other => other,
            })?;

        match resp.security_token {
            Some(token) if !token.is_empty() => {
                debug!("login successful");
                Ok(token)
            }
            _ => Err(Error::Authentication {
                message: "login response carried no security token".into(),
            }),
        }
    }
}
