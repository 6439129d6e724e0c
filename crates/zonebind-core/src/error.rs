// ── Core error types ──
//
// User-facing errors from zonebind-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<zonebind_api::Error>`
// impl translates transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out")]
    Timeout,

    // ── Zone resolution ──────────────────────────────────────────────
    #[error("No security zone matches '{query}'{}", best_hint(.best.as_ref()))]
    NoZoneMatch {
        query: String,
        /// Best candidate below the threshold, with its score.
        best: Option<(String, u8)>,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Configuration / interaction ──────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Login prompt failed: {message}")]
    Prompt { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

fn best_hint(best: Option<&(String, u8)>) -> String {
    match best {
        Some((name, score)) => format!(" (closest: '{name}' at {score}%)"),
        None => " (no zones defined)".into(),
    }
}

impl CoreError {
    /// Returns `true` for failures where asking for new credentials helps.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<zonebind_api::Error> for CoreError {
    fn from(err: zonebind_api::Error) -> Self {
        use zonebind_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => CoreError::AuthenticationFailed { message },
            ApiError::NotAuthenticated => CoreError::AuthenticationFailed {
                message: "no tenant known -- profile was never fetched".into(),
            },
            ApiError::Forbidden { message } => CoreError::Api {
                message: format!("permission denied: {message}"),
                code: None,
                status: Some(403),
            },
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid controller URL: {e}"),
            },
            ApiError::Tls(message) => CoreError::ConnectionFailed {
                url: "<tls>".into(),
                reason: message,
            },
            ApiError::Api {
                message,
                code,
                status,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            ApiError::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("unexpected response: {message}"),
                code: None,
                status: None,
            },
        }
    }
}
