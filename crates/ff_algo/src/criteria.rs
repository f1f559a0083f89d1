//! Per-rule targeting criteria and specificity (spec.md §3 "Rule").
//!
//! Criteria operate against `&dyn Context` rather than a generic context
//! type parameter: the snapshot this crate evaluates against is erased
//! (spec.md §9 "Type-indexed registry under erasure") and must hold rules
//! for many features declared against many concrete context types. The
//! typed `Feature<T, C>` boundary that recovers `C` lives in `ff_registry`;
//! by the time a rule reaches `ff_algo::evaluate`, only the `Context`
//! trait's surface is available.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::sync::Arc;
use ff_core::context::Context;
use ff_core::ids::{LocaleTag, PlatformTag, StableId};
use ff_core::rampup::RampUp;
use ff_core::version::VersionRange;

/// An opaque caller-supplied predicate over the context, plus the
/// specificity it contributes when present (spec.md §3, §9 "Extension
/// predicates as opaque functions"). Predicates MUST be pure: the engine
/// makes no guarantee about how many times, or in what order, a predicate
/// is invoked relative to other criteria.
#[derive(Clone)]
pub struct ContextPredicate {
    predicate: Arc<dyn Fn(&dyn Context) -> bool + Send + Sync>,
    pub specificity: u32,
}

impl ContextPredicate {
    pub fn new(specificity: u32, predicate: impl Fn(&dyn Context) -> bool + Send + Sync + 'static) -> Self {
        Self { predicate: Arc::new(predicate), specificity }
    }

    pub fn call(&self, context: &dyn Context) -> bool {
        (self.predicate)(context)
    }
}

/// Immutable targeting criteria a rule evaluates against a context
/// (spec.md §3). Empty sets are a universal match for that dimension.
#[derive(Clone, Default)]
pub struct Criteria {
    pub platforms: BTreeSet<PlatformTag>,
    pub locales: BTreeSet<LocaleTag>,
    pub version_range: VersionRange,
    pub axes: BTreeMap<String, BTreeSet<String>>,
    pub allowlist: BTreeSet<StableId>,
    pub ramp_up: RampUp,
    pub extension: Option<ContextPredicate>,
}

impl Criteria {
    /// Specificity: sum of one point per non-empty criterion group plus the
    /// extension predicate's own specificity, if present (spec.md §3
    /// "Specificity"). Allowlist and ramp-up never contribute.
    pub fn specificity(&self) -> u32 {
        let mut score = 0;
        if !self.platforms.is_empty() {
            score += 1;
        }
        if !self.locales.is_empty() {
            score += 1;
        }
        if self.version_range != VersionRange::Unbounded {
            score += 1;
        }
        score += self.axes.values().filter(|v| !v.is_empty()).count() as u32;
        if let Some(ext) = &self.extension {
            score += ext.specificity;
        }
        score
    }
}
