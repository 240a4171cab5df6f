//! `license-resolvr` binary.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config and merge command-line overrides / preferences.
//! 3. Scan `node_modules` for package descriptors.
//! 4. Resolve one license per package and apply verdicts.
//! 5. Render the requested report.
//! 6. Exit `0` (clean) or `1` (at least one error diagnostic).

mod cli;

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;

use cli::{Cli, ReportFormat};
use license_resolvr::audit::audit_project;
use license_resolvr::config::load_config;
use license_resolvr::report;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());
    if !path.is_dir() {
        bail!("{} is not a directory", path.display());
    }

    let mut config = load_config(&path, cli.config.as_deref())?;
    config.merge_cli(&cli.preferred, &cli.overrides);

    let outcome = audit_project(&path, &config)?;

    if outcome.packages.is_empty() {
        eprintln!(
            "No installed packages found in {}",
            path.join("node_modules").display()
        );
    } else if !cli.quiet {
        eprintln!("  {} {} packages", "→".cyan(), outcome.packages.len());
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(
                &outcome.packages,
                &outcome.diagnostics,
                &path,
                cli.verbose,
                cli.quiet,
            )?;
        }
        ReportFormat::Json => {
            report::json::render(&outcome.packages, &outcome.diagnostics)?;
        }
    }

    if outcome.has_errors {
        std::process::exit(1);
    }

    Ok(())
}
