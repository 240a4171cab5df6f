//! Built-in tie-breaker and fallback strategies, selectable from the config file.

use serde::Deserialize;

use crate::context::Diagnostics;
use crate::license::resolver::{Fallback, TieBreaker};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreakStrategy {
    /// Take the first candidate.
    #[default]
    First,
    /// Take the first candidate and warn that the package is multi-licensed.
    FirstWarn,
    /// Combine every candidate into an SPDX `OR` expression.
    Expression,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackStrategy {
    #[default]
    Warn,
    Error,
    Ignore,
}

impl TieBreakStrategy {
    pub fn into_tie_breaker<C>(self) -> TieBreaker<C>
    where
        C: Diagnostics + ?Sized + 'static,
    {
        match self {
            TieBreakStrategy::First => Box::new(|_: &C, candidates: &[String]| first(candidates)),
            TieBreakStrategy::FirstWarn => Box::new(|ctx: &C, candidates: &[String]| {
                let chosen = first(candidates);
                ctx.warn(format!(
                    "multiple license types found ({}); selected {}",
                    candidates.join(", "),
                    chosen
                ));
                chosen
            }),
            TieBreakStrategy::Expression => {
                Box::new(|_: &C, candidates: &[String]| or_expression(candidates))
            }
        }
    }
}

impl FallbackStrategy {
    /// Build the fallback callback. `substitute` is returned in place of `None`
    /// after the diagnostic has been recorded.
    pub fn into_fallback<C>(self, substitute: Option<String>) -> Fallback<C>
    where
        C: Diagnostics + ?Sized + 'static,
    {
        Box::new(move |ctx: &C, package_name: &str| {
            match self {
                FallbackStrategy::Warn => ctx.warn(missing_message(package_name)),
                FallbackStrategy::Error => ctx.error(missing_message(package_name)),
                FallbackStrategy::Ignore => {}
            }
            substitute.clone()
        })
    }
}

fn first(candidates: &[String]) -> String {
    candidates.first().cloned().unwrap_or_default()
}

fn or_expression(candidates: &[String]) -> String {
    candidates
        .iter()
        .map(|c| {
            // Compound members need parentheses to keep their grouping.
            if c.contains(' ') {
                format!("({})", c)
            } else {
                c.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn missing_message(package_name: &str) -> String {
    format!("could not determine license type for {}", package_name)
}
