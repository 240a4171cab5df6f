use anyhow::Result;
use serde::Serialize;

use crate::context::Diagnostic;
use crate::models::AuditedPackage;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    packages: &'a [AuditedPackage],
    diagnostics: &'a [Diagnostic],
}

pub fn to_string(packages: &[AuditedPackage], diagnostics: &[Diagnostic]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport {
        packages,
        diagnostics,
    })?)
}

pub fn render(packages: &[AuditedPackage], diagnostics: &[Diagnostic]) -> Result<()> {
    println!("{}", to_string(packages, diagnostics)?);
    Ok(())
}
