//! Report renderers for audit results.
//!
//! - [`terminal`]: colored, tabular output with summary box; respects `--verbose` / `--quiet`.
//! - [`json`]: machine-readable dump of packages and diagnostics.

pub mod json;
pub mod terminal;
