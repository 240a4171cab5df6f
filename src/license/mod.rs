//! License identifier resolution.
//!
//! - [`candidates`]: turns the `license` / `licenses` shapes of a descriptor into
//!   an ordered, de-duplicated [`CandidateSet`](candidates::CandidateSet).
//! - [`resolver`]: the precedence chain (override, fallback, single candidate,
//!   preferred list, tie-breaker) in [`LicenseResolver`](resolver::LicenseResolver).
//! - [`strategy`]: built-in tie-breakers and fallbacks reporting through
//!   [`Diagnostics`](crate::context::Diagnostics).

pub mod candidates;
pub mod resolver;
pub mod strategy;

pub use resolver::{Fallback, LicenseResolver, TieBreaker};
