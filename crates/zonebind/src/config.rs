//! Flag-aware wrappers over `zonebind_config`.
//!
//! Core never sees the `Cli` struct -- it receives a pre-built
//! `ControllerConfig`.

use tracing::debug;

use zonebind_config::{Overrides, build_controller_config, load_config, resolve_auth};
use zonebind_core::ControllerConfig;

use crate::cli::Cli;
use crate::error::CliError;

/// Build a `ControllerConfig` from the config file, environment, and flags.
pub fn controller_config(cli: &Cli) -> Result<ControllerConfig, CliError> {
    let config = load_config()?;
    let auth = resolve_auth(cli.token.as_deref(), cli.authtokenfile.as_deref())?;

    let overrides = Overrides {
        controller: cli.controller.clone(),
        timeout: cli.timeout,
        insecure: cli.insecure,
    };

    let controller = build_controller_config(&config, auth, &overrides)?;
    debug!(
        url = %controller.url,
        timeout_secs = controller.timeout.as_secs(),
        threshold = controller.zone_match_threshold,
        "controller config resolved"
    );
    Ok(controller)
}
