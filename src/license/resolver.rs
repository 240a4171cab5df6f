use std::collections::HashMap;

use crate::license::candidates::CandidateSet;
use crate::models::{PackageDescriptor, Resolution, ResolutionRule};

/// Picks one identifier when a descriptor declares several and none is preferred.
pub type TieBreaker<C> = Box<dyn Fn(&C, &[String]) -> String + Send + Sync>;

/// Supplies an identifier (or none) for a package with no usable license metadata.
pub type Fallback<C> = Box<dyn Fn(&C, &str) -> Option<String> + Send + Sync>;

/// Resolves one license identifier per package.
///
/// Precedence, first match wins:
/// 1. override table entry for the package name
/// 2. fallback strategy when the descriptor yields no candidates
/// 3. the only candidate
/// 4. the first entry of the preferred list found among the candidates
/// 5. tie-breaker strategy
///
/// The context `C` is handed to the strategies untouched. Configuration is
/// immutable after construction, so a resolver may be shared across threads
/// whenever `C` allows it.
pub struct LicenseResolver<C: ?Sized> {
    overrides: HashMap<String, String>,
    preferred: Vec<String>,
    tie_breaker: TieBreaker<C>,
    fallback: Fallback<C>,
}

impl<C: ?Sized> LicenseResolver<C> {
    pub fn new<T, F>(
        overrides: HashMap<String, String>,
        preferred: Vec<String>,
        tie_breaker: T,
        fallback: F,
    ) -> Self
    where
        T: Fn(&C, &[String]) -> String + Send + Sync + 'static,
        F: Fn(&C, &str) -> Option<String> + Send + Sync + 'static,
    {
        Self::with_strategies(
            overrides,
            preferred,
            Box::new(tie_breaker),
            Box::new(fallback),
        )
    }

    pub fn with_strategies(
        overrides: HashMap<String, String>,
        preferred: Vec<String>,
        tie_breaker: TieBreaker<C>,
        fallback: Fallback<C>,
    ) -> Self {
        Self {
            overrides,
            preferred,
            tie_breaker,
            fallback,
        }
    }

    /// Resolve the license identifier for `package_name`, or `None` when the
    /// fallback strategy could not determine one.
    pub fn resolve(
        &self,
        context: &C,
        package_name: &str,
        descriptor: &PackageDescriptor,
    ) -> Option<String> {
        self.resolve_detailed(context, package_name, descriptor).license
    }

    /// Like [`resolve`](Self::resolve), also reporting which rule decided.
    pub fn resolve_detailed(
        &self,
        context: &C,
        package_name: &str,
        descriptor: &PackageDescriptor,
    ) -> Resolution {
        if let Some(id) = self.overrides.get(package_name) {
            return Resolution {
                license: Some(id.clone()),
                rule: ResolutionRule::Override,
            };
        }

        let candidates = CandidateSet::from_descriptor(descriptor);

        if candidates.is_empty() {
            return Resolution {
                license: (self.fallback)(context, package_name),
                rule: ResolutionRule::Fallback,
            };
        }

        if candidates.len() == 1 {
            return Resolution {
                license: candidates.into_vec().pop(),
                rule: ResolutionRule::Single,
            };
        }

        if let Some(id) = self.preferred.iter().find(|p| candidates.contains(p)) {
            return Resolution {
                license: Some(id.clone()),
                rule: ResolutionRule::Preferred,
            };
        }

        Resolution {
            license: Some((self.tie_breaker)(context, candidates.as_slice())),
            rule: ResolutionRule::TieBreak,
        }
    }
}

impl<C: ?Sized> std::fmt::Debug for LicenseResolver<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseResolver")
            .field("overrides", &self.overrides)
            .field("preferred", &self.preferred)
            .finish_non_exhaustive()
    }
}
