use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::context::{Diagnostic, Severity};
use crate::models::{AuditedPackage, ResolutionRule, Verdict};

/// Render a colored terminal report.
pub fn render(
    packages: &[AuditedPackage],
    diagnostics: &[Diagnostic],
    path: &Path,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let total = packages.len();
    let pass_count = count(packages, &Verdict::Pass);
    let warn_count = count(packages, &Verdict::Warn);
    let error_count = count(packages, &Verdict::Error);

    if quiet {
        println!(
            "Total: {}  Pass: {}  Warn: {}  Error: {}",
            total,
            pass_count.to_string().green(),
            warn_count.to_string().yellow(),
            error_count.to_string().red(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "license-resolvr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Scanning: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total packages     : {}", total));
    println!(
        " │  {:<48} │",
        format!(
            "{}  Pass            : {:>4}  {}",
            "✓".green(),
            pass_count,
            summarize_licenses(packages, &Verdict::Pass)
        )
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Warn            : {:>4}  {}",
            "⚠".yellow(),
            warn_count,
            summarize_licenses(packages, &Verdict::Warn)
        )
    );
    println!(
        " │  {:<48} │",
        format!(
            "{}  Error           : {:>4}  {}",
            "✗".red(),
            error_count,
            summarize_licenses(packages, &Verdict::Error)
        )
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if error_count > 0 {
        println!(" {} Unacceptable licenses:\n", "[ERROR]".red().bold());
        render_table(packages, &Verdict::Error);
        println!();
    }

    if warn_count > 0 {
        println!(" {} Unresolved licenses:\n", "[WARN]".yellow().bold());
        render_table(packages, &Verdict::Warn);
        println!();
    }

    if verbose && pass_count > 0 {
        println!(" {} All resolved packages:\n", "[PASS]".green().bold());
        render_table(packages, &Verdict::Pass);
        println!();
    }

    for d in diagnostics {
        match d.severity {
            Severity::Warning => eprintln!(" {} {}", "warning:".yellow().bold(), d.message),
            Severity::Error => eprintln!(" {} {}", "error:".red().bold(), d.message),
        }
    }

    Ok(())
}

fn count(packages: &[AuditedPackage], verdict: &Verdict) -> usize {
    packages.iter().filter(|p| &p.verdict == verdict).count()
}

fn render_table(packages: &[AuditedPackage], verdict_filter: &Verdict) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
        ]);

    for p in packages.iter().filter(|p| &p.verdict == verdict_filter) {
        let (verdict_str, verdict_color) = match p.verdict {
            Verdict::Pass => ("✓ pass", Color::Green),
            Verdict::Warn => ("⚠ warn", Color::Yellow),
            Verdict::Error => ("✗ error", Color::Red),
        };

        let rule_color = match p.rule {
            ResolutionRule::Override => Color::Cyan,
            ResolutionRule::Fallback => Color::DarkGrey,
            ResolutionRule::Single => Color::Reset,
            ResolutionRule::Preferred | ResolutionRule::TieBreak => Color::Magenta,
        };

        table.add_row(vec![
            Cell::new(&p.name),
            Cell::new(&p.version),
            Cell::new(p.license.as_deref().unwrap_or("unknown")),
            Cell::new(p.rule.to_string()).fg(rule_color),
            Cell::new(verdict_str)
                .fg(verdict_color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

/// Top three licenses for a verdict, most frequent first: `[MIT (12), ISC (3)]`.
fn summarize_licenses(packages: &[AuditedPackage], verdict: &Verdict) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for p in packages.iter().filter(|p| &p.verdict == verdict) {
        *counts
            .entry(p.license.as_deref().unwrap_or("unknown"))
            .or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(lic, cnt)| format!("{} ({})", lic, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
