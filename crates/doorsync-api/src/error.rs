use thiserror::Error;

/// Top-level error type for the `doorsync-api` crate.
///
/// Covers every failure mode across both upstream services:
/// authentication, transport, envelope return codes, and payload decoding.
/// `doorsync-core` maps these into domain errors depending on which service
/// produced them.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected or the login response carried no token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to build the underlying HTTP client.
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    // ── Door service ────────────────────────────────────────────────
    /// Non-zero `ReturnCode` in a MyQ response envelope.
    #[error("MyQ API error (rc {code}): {message}")]
    Api { code: String, message: String },

    /// Unexpected HTTP status from either service.
    #[error("Unexpected HTTP {status}: {body}")]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON or XML decoding failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the underlying request never reached the server
    /// (connect failure, timeout, DNS).
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    pub(crate) fn deserialization(err: impl std::fmt::Display, body: &str) -> Self {
        let preview: String = body.chars().take(200).collect();
        Self::Deserialization {
            message: format!("{err} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    }
}
