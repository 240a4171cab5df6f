//! `license-resolvr`: pick one canonical license identifier per package.
//!
//! The heart of the crate is [`license::LicenseResolver`]: given a package name
//! and its `package.json` descriptor it applies, in order, the override table,
//! the fallback strategy (no usable metadata), the single-candidate shortcut,
//! the preferred-license list, and finally the tie-breaker strategy.
//!
//! Around it sit the pieces the `license-resolvr` binary needs:
//! [`config`] loads policy, [`scanner`] reads installed descriptors,
//! [`audit`] runs the resolver and assigns verdicts, [`report`] renders results.

pub mod audit;
pub mod config;
pub mod context;
pub mod license;
pub mod models;
pub mod report;
pub mod scanner;
