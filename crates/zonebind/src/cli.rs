//! Clap derive structures for the `zonebind` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this file may
//! only depend on `clap` and `clap_complete`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// zonebind -- bind interfaces to a security zone across spoke sites
#[derive(Debug, Parser)]
#[command(
    name = "zonebind",
    version,
    about = "Bind matching interfaces to a CloudGenix security zone on every spoke site",
    long_about = "Finds the security zone whose name best matches --zonename, then walks every \
        SPOKE site and binds each element interface whose name starts with \
        --interface-match to that zone.\n\n\
        An element that already maps the zone to other interfaces is left untouched.\n\n\
        Authentication: --token, then --authtokenfile, then X_AUTH_TOKEN, then \
        AUTH_TOKEN, then an interactive email/password login."
)]
pub struct Cli {
    // ── Authentication ──────────────────────────────────────────────
    /// Auth token for the controller
    #[arg(long, short = 't', value_name = "TOKEN")]
    pub token: Option<String>,

    /// File containing the auth token
    #[arg(long = "authtokenfile", short = 'f', value_name = "FILE")]
    pub authtokenfile: Option<PathBuf>,

    // ── What to bind ────────────────────────────────────────────────
    /// Security zone name (fuzzy matched)
    #[arg(
        long = "zonename",
        short = 'z',
        value_name = "NAME",
        required_unless_present = "completions"
    )]
    pub zonename: Option<String>,

    /// Bind interfaces whose name starts with this prefix
    #[arg(
        long = "interface-match",
        short = 'i',
        value_name = "PREFIX",
        required_unless_present = "completions"
    )]
    pub interface_match: Option<String>,

    // ── Controller ──────────────────────────────────────────────────
    /// Controller URL (overrides config)
    #[arg(long, short = 'c', env = "ZONEBIND_CONTROLLER", value_name = "URL")]
    pub controller: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "ZONEBIND_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k')]
    pub insecure: bool,

    // ── Behaviour ───────────────────────────────────────────────────
    /// Decide and report, but never create mappings
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Keep the controller session open when done
    #[arg(long)]
    pub no_logout: bool,

    // ── Output ──────────────────────────────────────────────────────
    /// Report format
    #[arg(long, short = 'o', default_value = "table")]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto")]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the report
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Tab-separated, one triple per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}
