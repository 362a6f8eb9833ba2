use thiserror::Error;

/// Message carried by [`Error::Authentication`] when the login response
/// does not yield a usable token.
pub const INVALID_CREDENTIALS: &str = "Credentials are not valid";

/// Top-level error type for the `elmax-api` crate.
///
/// Covers every failure mode of the cloud client: reaching the host,
/// logging in, HTTP status failures and undecodable payloads.
/// The `elmax` binary maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Connection ──────────────────────────────────────────────────
    /// The base host could not be reached (DNS, refused connection, TLS).
    #[error("Could not connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Any other HTTP transport error.
    #[error("HTTP transport error: {0}")]
    Transport(#[source] reqwest::Error),

    // ── Authentication ──────────────────────────────────────────────
    /// Login went through at the transport level but yielded no token.
    #[error("{message}")]
    Authentication { message: String },

    // ── Configuration ───────────────────────────────────────────────
    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:` or `data:`).
    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    /// An identifier or PIN that cannot stand as one URL path segment
    /// (empty, `.` or `..`).
    #[error("Invalid path segment: {segment:?}")]
    InvalidPathSegment { segment: String },

    // ── API ─────────────────────────────────────────────────────────
    /// The API answered with a non-success HTTP status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// A required field is structurally missing from a response.
    #[error("No data available: {message}")]
    DataUnavailable { message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The error raised when a login response carries no token.
    pub(crate) fn invalid_credentials() -> Self {
        Self::Authentication {
            message: INVALID_CREDENTIALS.into(),
        }
    }

    /// Returns `true` if prompting for new credentials might resolve this.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The client itself never retries; this is a hint for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connection { .. } | Self::Timeout { .. } => true,
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_message_is_exact() {
        let err = Error::invalid_credentials();
        assert_eq!(err.to_string(), "Credentials are not valid");
        assert!(err.is_auth_error());
        assert!(!err.is_transient());
    }

    #[test]
    fn api_status_classification() {
        let unauthorized = Error::Api {
            status: 401,
            message: String::new(),
        };
        let missing = Error::Api {
            status: 404,
            message: String::new(),
        };
        let unavailable = Error::Api {
            status: 503,
            message: String::new(),
        };

        assert!(unauthorized.is_auth_error());
        assert!(missing.is_not_found());
        assert!(unavailable.is_transient());
        assert!(!missing.is_transient());
    }
}
