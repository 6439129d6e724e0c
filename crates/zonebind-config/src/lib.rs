//! Configuration for the zonebind CLI.
//!
//! TOML settings, the auth token chain (flag, file, environment), and
//! translation to `zonebind_core::ControllerConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use zonebind_core::{
    AuthCredentials, ControllerConfig, DEFAULT_CONTROLLER, DEFAULT_MATCH_THRESHOLD,
    TlsVerification, TokenSource,
};

/// Token environment variables, in lookup order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["X_AUTH_TOKEN", "AUTH_TOKEN"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("cannot read auth token file {}: {source}", path.display())]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("empty {origin}")]
    EmptyToken { origin: TokenSource },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Settings read from `config.toml` and `ZONEBIND_*` variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Controller base URL.
    #[serde(default = "default_controller")]
    pub controller: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Zone names must score strictly above this (0-100).
    #[serde(default = "default_threshold")]
    pub zone_match_threshold: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: default_controller(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            zone_match_threshold: default_threshold(),
        }
    }
}

fn default_controller() -> String {
    DEFAULT_CONTROLLER.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_threshold() -> u8 {
    DEFAULT_MATCH_THRESHOLD
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "zonebind", "zonebind").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("zonebind");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the platform path and the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path` (missing is fine) and the environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ZONEBIND_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Auth token chain ────────────────────────────────────────────────

/// Resolve credentials from the flag, the token file, then the process env.
pub fn resolve_auth(
    token: Option<&str>,
    token_file: Option<&Path>,
) -> Result<AuthCredentials, ConfigError> {
    resolve_auth_with(token, token_file, |var| std::env::var(var).ok())
}

/// Like [`resolve_auth`], with the environment lookup supplied by the caller.
///
/// Precedence: `--token`, `--authtokenfile`, `X_AUTH_TOKEN`, `AUTH_TOKEN`,
/// then interactive login. An empty flag or file is an error; an empty
/// variable is skipped.
pub fn resolve_auth_with(
    token: Option<&str>,
    token_file: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<AuthCredentials, ConfigError> {
    if let Some(raw) = token {
        return non_empty(raw.trim(), TokenSource::Flag);
    }

    if let Some(path) = token_file {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::TokenFile {
            path: path.to_path_buf(),
            source,
        })?;
        return non_empty(contents.trim(), TokenSource::File(path.to_path_buf()));
    }

    for var in TOKEN_ENV_VARS {
        if let Some(value) = env(var).filter(|v| !v.trim().is_empty()) {
            return non_empty(value.trim(), TokenSource::Env(var));
        }
    }

    Ok(AuthCredentials::Interactive)
}

fn non_empty(token: &str, source: TokenSource) -> Result<AuthCredentials, ConfigError> {
    if token.is_empty() {
        return Err(ConfigError::EmptyToken { origin: source });
    }
    Ok(AuthCredentials::Token {
        token: SecretString::from(token.to_owned()),
        source,
    })
}

// ── ControllerConfig ────────────────────────────────────────────────

/// Command-line values that take precedence over the loaded [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub controller: Option<String>,
    pub timeout: Option<u64>,
    pub insecure: bool,
}

/// Merge config, overrides, and credentials into a `ControllerConfig`.
pub fn build_controller_config(
    config: &Config,
    auth: AuthCredentials,
    overrides: &Overrides,
) -> Result<ControllerConfig, ConfigError> {
    let url_str = overrides
        .controller
        .as_deref()
        .unwrap_or(&config.controller);
    let url: url::Url = url_str.parse().map_err(|_| ConfigError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    if config.zone_match_threshold > 100 {
        return Err(ConfigError::Validation {
            field: "zone_match_threshold".into(),
            reason: format!("expected 0-100, got {}", config.zone_match_threshold),
        });
    }

    let tls = if overrides.insecure || config.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = config.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut controller = ControllerConfig::new(url, auth);
    controller.tls = tls;
    controller.timeout = Duration::from_secs(overrides.timeout.unwrap_or(config.timeout));
    controller.zone_match_threshold = config.zone_match_threshold;
    Ok(controller)
}
