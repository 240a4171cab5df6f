use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::context::AuditContext;
use crate::license::strategy::{FallbackStrategy, TieBreakStrategy};
use crate::license::LicenseResolver;

/// Root configuration structure, deserialized from `.license-resolvr/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Package name → license identifier. Always wins over package metadata.
    #[serde(default)]
    pub overrides: HashMap<String, String>,
    /// Licenses to pick, in order, when a package declares more than one.
    #[serde(default)]
    pub preferred: Vec<String>,
    /// What to do with multi-licensed packages that match nothing in `preferred`.
    #[serde(default)]
    pub tie_breaker: TieBreakStrategy,
    /// What to do with packages that declare no usable license.
    #[serde(default)]
    pub fallback: FallbackStrategy,
    /// Identifier reported for packages the fallback could not resolve.
    #[serde(default)]
    pub fallback_license: Option<String>,
    /// Regex; resolved licenses matching it are errors.
    #[serde(default)]
    pub unacceptable: Option<String>,
    /// Regex; packages whose name matches it are skipped.
    #[serde(default)]
    pub exclude: Option<String>,
}

/// Regexes compiled once per run.
#[derive(Debug, Default)]
pub struct Filters {
    pub unacceptable: Option<Regex>,
    pub exclude: Option<Regex>,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command-line additions: `preferred` entries go after configured ones,
    /// `overrides` replace configured entries of the same name.
    pub fn merge_cli(&mut self, preferred: &[String], overrides: &[(String, String)]) {
        for id in preferred {
            if !self.preferred.contains(id) {
                self.preferred.push(id.clone());
            }
        }
        for (name, id) in overrides {
            self.overrides.insert(name.clone(), id.clone());
        }
    }

    pub fn build_resolver(&self) -> LicenseResolver<AuditContext> {
        LicenseResolver::with_strategies(
            self.overrides.clone(),
            self.preferred.clone(),
            self.tie_breaker.into_tie_breaker::<AuditContext>(),
            self.fallback
                .into_fallback::<AuditContext>(self.fallback_license.clone()),
        )
    }

    pub fn filters(&self) -> Result<Filters> {
        let compile = |pattern: &Option<String>, key: &str| -> Result<Option<Regex>> {
            pattern
                .as_deref()
                .map(|p| Regex::new(p).with_context(|| format!("invalid `{}` pattern: {}", key, p)))
                .transpose()
        };
        Ok(Filters {
            unacceptable: compile(&self.unacceptable, "unacceptable")?,
            exclude: compile(&self.exclude, "exclude")?,
        })
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.license-resolvr/config.toml`
/// 3. `~/.config/license-resolvr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-resolvr").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home_config_path(&home);
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn home_config_path(home: &Path) -> PathBuf {
    home.join(".config").join("license-resolvr").join("config.toml")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    Config::from_toml_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
