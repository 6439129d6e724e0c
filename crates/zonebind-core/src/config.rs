// ── Runtime connection configuration ──
//
// These types describe *how* to reach the controller and authenticate.
// They carry credential data but never touch disk; `zonebind-config`
// builds them from files, flags, and the environment.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use zonebind_api::{CgxClient, TlsMode, TransportConfig};

use crate::error::CoreError;
use crate::zone::DEFAULT_MATCH_THRESHOLD;

/// Where a token came from. Only used for log messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// `--token` on the command line.
    Flag,
    /// `--authtokenfile` contents.
    File(PathBuf),
    /// An environment variable (`X_AUTH_TOKEN` or `AUTH_TOKEN`).
    Env(&'static str),
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "auth token from command line"),
            Self::File(path) => write!(f, "auth token from file {}", path.display()),
            Self::Env(var) => write!(f, "environment variable {var}"),
        }
    }
}

/// How to authenticate with the controller.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// A pre-issued token. A rejected token is fatal.
    Token {
        token: SecretString,
        source: TokenSource,
    },
    /// Prompt for email and password until a login succeeds.
    Interactive,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification.
    DangerAcceptInvalid,
}

/// Everything needed to open a session against one controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub url: Url,
    pub auth: AuthCredentials,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Minimum fuzzy score a zone name must exceed (0-100).
    pub zone_match_threshold: u8,
}

impl ControllerConfig {
    pub fn new(url: Url, auth: AuthCredentials) -> Self {
        Self {
            url,
            auth,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            zone_match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    /// Translate into the API crate's transport settings.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig::default()
            .with_tls(tls)
            .with_timeout(self.timeout)
            .with_cookie_jar()
    }

    /// Build an unauthenticated API client for this controller.
    pub fn client(&self) -> Result<CgxClient, CoreError> {
        Ok(CgxClient::new(self.url.clone(), &self.transport())?)
    }
}
