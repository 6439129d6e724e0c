//! Report rendering: table, JSON, plain.
//!
//! Table uses `tabled`, JSON serializes the `BindReport` as is, plain emits
//! one tab-separated line per (site, element, interface) triple.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use zonebind_core::{BindOutcome, BindRecord, BindReport};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatcher ────────────────────────────────────────────────

/// Render the report in the chosen format.
pub fn render_report(
    format: &OutputFormat,
    report: &BindReport,
    color: bool,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Table => {
            let summary = summary(report, color);
            if report.records.is_empty() {
                format!(
                    "No interfaces matching '{}' on spoke sites.\n{summary}",
                    report.interface_prefix
                )
            } else {
                let rows: Vec<ReportRow> = report.records.iter().map(ReportRow::from).collect();
                format!("{}\n{summary}", render_table(&rows))
            }
        }
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::JsonCompact => serde_json::to_string(report)?,
        OutputFormat::Plain => report
            .records
            .iter()
            .map(plain_line)
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Table ────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Element")]
    element: String,
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Outcome")]
    outcome: &'static str,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl From<&BindRecord> for ReportRow {
    fn from(r: &BindRecord) -> Self {
        Self {
            site: name_or_id(r.site_name.as_deref(), &r.site_id),
            element: name_or_id(r.element_name.as_deref(), &r.element_id),
            interface: r
                .interface_name
                .clone()
                .or_else(|| r.interface_id.clone())
                .unwrap_or_else(|| "-".into()),
            outcome: (&r.outcome).into(),
            detail: detail(&r.outcome),
        }
    }
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn name_or_id(name: Option<&str>, id: &str) -> String {
    name.unwrap_or(id).to_owned()
}

fn detail(outcome: &BindOutcome) -> String {
    match outcome {
        BindOutcome::Created | BindOutcome::AlreadyBound => String::new(),
        BindOutcome::Planned => "dry run".into(),
        BindOutcome::ZoneInUse {
            bound_interface_ids,
        } if bound_interface_ids.is_empty() => "zone mapped without interfaces".into(),
        BindOutcome::ZoneInUse {
            bound_interface_ids,
        } => format!("zone mapped to {}", bound_interface_ids.join(", ")),
        BindOutcome::Failed { reason } => reason.clone(),
    }
}

fn summary(report: &BindReport, color: bool) -> String {
    let created = format!(
        "{} {}",
        report.created(),
        if report.dry_run { "planned" } else { "created" }
    );
    let skipped = format!("{} skipped", report.skipped());
    let failed = format!("{} failed", report.failed());

    let (created, skipped, failed) = if color {
        (
            created.green().to_string(),
            skipped.yellow().to_string(),
            if report.has_failures() {
                failed.red().to_string()
            } else {
                failed
            },
        )
    } else {
        (created, skipped, failed)
    };

    format!(
        "Zone '{}' matched at {}%: {} spoke sites, {} elements; {created}, {skipped}, {failed}",
        report.zone.name, report.zone.score, report.spoke_sites, report.elements_scanned
    )
}

// ── Plain ────────────────────────────────────────────────────────────

fn plain_line(r: &BindRecord) -> String {
    let outcome: &'static str = (&r.outcome).into();
    format!(
        "{}\t{}\t{}\t{outcome}",
        r.site_id,
        r.element_id,
        r.interface_id.as_deref().unwrap_or("-")
    )
}
