// ── Door-service session ──
//
// Owns the security-token lifecycle: acquire on first use, reuse until the
// validity window closes, reacquire afterwards. The mutex is held across
// the login call so concurrent callers share one in-flight authentication.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use tracing::{debug, info, trace};

use doorsync_api::MyqClient;

use crate::config::Credentials;
use crate::error::CoreError;

/// A cached token and the instant it stops being usable.
#[derive(Debug)]
pub struct Session {
    token: SecretString,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// A token is valid strictly before its expiry.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

pub struct SessionManager {
    client: Arc<MyqClient>,
    credentials: Credentials,
    validity: Duration,
    session: Mutex<Option<Session>>,
}

impl SessionManager {
    pub fn new(client: Arc<MyqClient>, credentials: Credentials, validity: Duration) -> Self {
        Self {
            client,
            credentials,
            validity,
            session: Mutex::new(None),
        }
    }

    /// Return a usable token, authenticating only when none is cached or
    /// the cached one has expired.
    ///
    /// A failed login leaves the previous state untouched, so the next call
    /// retries from scratch.
    pub async fn token(&self) -> Result<String, CoreError> {
        let mut guard = self.session.lock().await;

        if let Some(session) = guard.as_ref() {
            if session.is_valid_at(Utc::now()) {
                trace!("reusing cached session token");
                return Ok(session.token.expose_secret().to_owned());
            }
            debug!(expired_at = %session.expires_at, "session token expired");
        }

        let token = self
            .client
            .login(&self.credentials.username, &self.credentials.password)
            .await
            .map_err(|e| match e {
                doorsync_api::Error::Authentication { message } => {
                    CoreError::AuthenticationFailure { message }
                }
                other => CoreError::AuthenticationFailure {
                    message: other.to_string(),
                },
            })?;

        let validity = TimeDelta::from_std(self.validity).unwrap_or(TimeDelta::MAX);
        let expires_at = Utc::now()
            .checked_add_signed(validity)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        info!(%expires_at, "authenticated with door service");
        *guard = Some(Session {
            token: SecretString::from(token.clone()),
            expires_at,
        });

        Ok(token)
    }

    /// Expiry of the cached session, if one exists.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.session.lock().await.as_ref().map(Session::expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_valid_strictly_before_expiry() {
        let now = Utc::now();
        let session = Session {
            token: SecretString::from("t".to_string()),
            expires_at: now,
        };
        assert!(session.is_valid_at(now - TimeDelta::seconds(1)));
        assert!(!session.is_valid_at(now));
        assert!(!session.is_valid_at(now + TimeDelta::seconds(1)));
    }
}
