use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-resolvr",
    about = "Resolve one license identifier per installed package and audit the result",
    version
)]
pub struct Cli {
    /// Project path to scan (the directory holding node_modules)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file [default: ./.license-resolvr/config.toml, fallback ~/.config/license-resolvr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Preferred license for multi-licensed packages (repeatable, appended after configured ones)
    #[arg(long = "preferred", value_name = "ID")]
    pub preferred: Vec<String>,

    /// Force a package's license (repeatable)
    #[arg(long = "override", value_name = "NAME=ID", value_parser = parse_override)]
    pub overrides: Vec<(String, String)>,

    /// Show all packages (not just warnings/errors)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

/// Split `NAME=ID`. The last `=` separates, so scoped names like `@scope/pkg` work.
fn parse_override(raw: &str) -> Result<(String, String), String> {
    let (name, id) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=ID, got `{}`", raw))?;
    if name.is_empty() || id.is_empty() {
        return Err(format!("expected NAME=ID, got `{}`", raw));
    }
    Ok((name.to_string(), id.to_string()))
}
