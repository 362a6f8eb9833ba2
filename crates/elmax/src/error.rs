//! CLI error types with miette diagnostics.
//!
//! Maps `elmax_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use elmax_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(elmax::connection_failed),
        help(
            "Check your network connection and that the API is reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(elmax::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(elmax::auth_failed),
        help(
            "Verify the username and password of the profile.\n\
             Run: elmax config set-password --profile <name>"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(elmax::no_credentials),
        help(
            "Add a [profiles.{profile}] section with a username to the config file,\n\
             or set ELMAX_USERNAME and ELMAX_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(elmax::not_found),
        help("Run: elmax {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(elmax::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(elmax::validation))]
    Validation { field: String, reason: String },

    #[error("Missing {what}")]
    #[diagnostic(
        code(elmax::missing_argument),
        help("Pass --{flag} or set `{key}` in the profile.")
    )]
    MissingArgument {
        what: String,
        flag: String,
        key: String,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(elmax::profile_not_found),
        help("Available profiles: {available}\nConfig file: {path}")
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(code(elmax::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(elmax::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(elmax::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::MissingArgument { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── elmax_api::Error → CliError mapping ──────────────────────────────

impl From<elmax_api::Error> for CliError {
    fn from(err: elmax_api::Error) -> Self {
        use elmax_api::Error;

        match err {
            Error::Connection { url, source } => Self::ConnectionFailed {
                url,
                source: Box::new(source),
            },

            Error::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },

            Error::Authentication { message } => Self::AuthFailed { message },

            Error::Api { status: 401, message } => Self::AuthFailed { message },

            Error::Api {
                status: 404,
                message,
            } => Self::NotFound {
                resource_type: "endpoint".into(),
                identifier: message,
                list_command: "endpoints".into(),
            },

            Error::Api { status, message } => Self::ApiError {
                code: format!("http_{status}"),
                message,
            },

            Error::DataUnavailable { message } => Self::ApiError {
                code: "no_data".into(),
                message,
            },

            Error::Deserialization { message, body: _ } => Self::ApiError {
                code: "bad_response".into(),
                message,
            },

            Error::InvalidUrl(e) => Self::Validation {
                field: "base_url".into(),
                reason: e.to_string(),
            },

            Error::InvalidBaseUrl { url } => Self::Validation {
                field: "base_url".into(),
                reason: format!("cannot be used as a base: {url}"),
            },

            Error::InvalidPathSegment { segment } => Self::Validation {
                field: "identifier".into(),
                reason: format!("{segment:?} is not a usable endpoint or panel identifier"),
            },

            Error::Transport(e) => Self::ApiError {
                code: "transport".into(),
                message: e.to_string(),
            },
        }
    }
}
