mod cli;
mod config;
mod error;
mod output;
mod prompt;

use clap::{CommandFactory, Parser};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use zonebind_core::{
    BindOptions, BindReport, CgxClient, ControllerConfig, ZoneBinder, connect, resolve_zone,
};

use crate::cli::Cli;
use crate::error::CliError;
use crate::prompt::TerminalPrompt;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(&cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "zonebind", &mut std::io::stdout());
        return Ok(());
    }

    let (Some(zone_query), Some(prefix)) = (cli.zonename.as_deref(), cli.interface_match.as_deref())
    else {
        return Err(CliError::Validation {
            field: "arguments".into(),
            reason: "--zonename and --interface-match are required".into(),
        });
    };

    let controller = config::controller_config(cli)?;
    let client = controller.client()?;

    connect(&client, &controller.auth, &mut TerminalPrompt).await?;

    let options = BindOptions {
        interface_prefix: prefix.to_owned(),
        dry_run: cli.dry_run,
    };
    let result = bind(&client, &controller, zone_query, options).await;

    if cli.no_logout {
        debug!("leaving controller session open");
    } else if let Err(e) = client.logout().await {
        warn!(error = %e, "logout failed");
    }

    let report = result?;
    let color = output::should_color(&cli.color);
    let rendered = output::render_report(&cli.output, &report, color)?;
    output::print_output(&rendered, cli.quiet);

    if report.has_failures() {
        return Err(CliError::BindFailures {
            failed: report.failed(),
            total: report.records.len(),
        });
    }
    Ok(())
}

/// Resolve the zone, then scan and bind.
async fn bind(
    client: &CgxClient,
    controller: &ControllerConfig,
    zone_query: &str,
    options: BindOptions,
) -> Result<BindReport, CliError> {
    let zone = resolve_zone(client, zone_query, controller.zone_match_threshold).await?;

    Ok(ZoneBinder::new(client, &zone, options).run().await?)
}
