use std::path::Path;

use anyhow::Result;

use crate::config::{Config, Filters};
use crate::context::{AuditContext, Diagnostic, Diagnostics};
use crate::license::LicenseResolver;
use crate::models::{AuditedPackage, Verdict};
use crate::scanner::{scan_node_modules, ScannedPackage};

/// Everything a report needs from one audit run.
#[derive(Debug)]
pub struct AuditReport {
    pub packages: Vec<AuditedPackage>,
    pub diagnostics: Vec<Diagnostic>,
    pub has_errors: bool,
}

/// Scan `project` and audit every installed package under `config`.
///
/// Scan problems are carried in the report's diagnostics, also when no
/// package could be loaded at all. Only an invalid config is an error.
pub fn audit_project(project: &Path, config: &Config) -> Result<AuditReport> {
    let resolver = config.build_resolver();
    let filters = config.filters()?;
    let ctx = AuditContext::new();

    let scanned = scan_node_modules(project, &ctx);
    let packages = audit(&resolver, &filters, &ctx, &scanned);

    let has_errors = ctx.has_errors();
    Ok(AuditReport {
        packages,
        diagnostics: ctx.into_diagnostics(),
        has_errors,
    })
}

/// Resolve every scanned package and assign a verdict.
///
/// Packages whose name matches the `exclude` filter are dropped. A license
/// matching `unacceptable` is an error and is also recorded in `ctx`; an
/// unresolved license is a warning.
pub fn audit(
    resolver: &LicenseResolver<AuditContext>,
    filters: &Filters,
    ctx: &AuditContext,
    packages: &[ScannedPackage],
) -> Vec<AuditedPackage> {
    packages
        .iter()
        .filter(|p| {
            !filters
                .exclude
                .as_ref()
                .is_some_and(|re| re.is_match(&p.name))
        })
        .map(|p| {
            let resolution = resolver.resolve_detailed(ctx, &p.name, &p.descriptor);

            let verdict = match resolution.license.as_deref() {
                None => Verdict::Warn,
                Some(id) if filters.unacceptable.as_ref().is_some_and(|re| re.is_match(id)) => {
                    ctx.error(format!("{} has unacceptable license type {}", p.name, id));
                    Verdict::Error
                }
                Some(_) => Verdict::Pass,
            };

            AuditedPackage {
                name: p.name.clone(),
                version: p
                    .descriptor
                    .version
                    .clone()
                    .unwrap_or_else(|| "*".to_string()),
                license: resolution.license,
                rule: resolution.rule,
                verdict,
            }
        })
        .collect()
}
