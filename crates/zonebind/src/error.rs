//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use zonebind_config::ConfigError;
use zonebind_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const BIND_FAILED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(zonebind::connection_failed),
        help(
            "{reason}\n\
             Check the controller URL (--controller / ZONEBIND_CONTROLLER).\n\
             For a private CA, set ca_cert in the config file or use --insecure (-k)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(zonebind::auth_failed),
        help(
            "Tokens are read from --token, --authtokenfile, X_AUTH_TOKEN or AUTH_TOKEN.\n\
             Provide none of them to log in with email and password instead."
        )
    )]
    AuthFailed { message: String },

    #[error("Interactive login aborted: {message}")]
    #[diagnostic(
        code(zonebind::login_aborted),
        help("Interactive login needs a terminal. Pass --token in scripts.")
    )]
    LoginAborted { message: String },

    #[error("Cannot read auth token file {}", path.display())]
    #[diagnostic(code(zonebind::token_file))]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Zone ─────────────────────────────────────────────────────────
    #[error("No security zone matches '{query}'")]
    #[diagnostic(
        code(zonebind::zone_not_found),
        help("{hint}\nZone names are fuzzy matched; try the zone's exact name.")
    )]
    ZoneNotFound { query: String, hint: String },

    // ── Binding ──────────────────────────────────────────────────────
    #[error("{failed} of {total} interface bindings failed")]
    #[diagnostic(
        code(zonebind::bind_failed),
        help("See the report above; rerun with -v for per-interface details.")
    )]
    BindFailures { failed: usize, total: usize },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(zonebind::api_error))]
    ApiError { code: String, message: String },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(zonebind::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(zonebind::config))]
    Config(Box<figment::Error>),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out")]
    #[diagnostic(
        code(zonebind::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Serialization ────────────────────────────────────────────────
    #[error("Cannot render report: {0}")]
    #[diagnostic(code(zonebind::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::LoginAborted { .. } => exit_code::AUTH,
            Self::ZoneNotFound { .. } => exit_code::NOT_FOUND,
            Self::BindFailures { .. } => exit_code::BIND_FAILED,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::TokenFile { .. } | Self::Config(_) => exit_code::USAGE,
            Self::ApiError { .. } | Self::Json(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NoZoneMatch { query, best } => CliError::ZoneNotFound {
                query,
                hint: match best {
                    Some((name, score)) => format!("Closest zone: '{name}' ({score}%)."),
                    None => "The tenant has no security zones.".into(),
                },
            },

            CoreError::Api {
                message,
                code,
                status,
            } => CliError::ApiError {
                code: code
                    .or_else(|| status.map(|s| format!("HTTP {s}")))
                    .unwrap_or_else(|| "unknown".into()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },

            CoreError::Prompt { message } => CliError::LoginAborted { message },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::TokenFile { path, source } => CliError::TokenFile { path, source },
            ConfigError::EmptyToken { origin } => CliError::Validation {
                field: "auth token".into(),
                reason: format!("empty {origin}"),
            },
            ConfigError::Figment(err) => CliError::Config(err),
        }
    }
}
