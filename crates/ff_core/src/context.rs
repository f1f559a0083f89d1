//! The base `Context` trait (spec.md §3, §6).
//!
//! A context is constructed per evaluation call and is never retained by the
//! engine (spec.md §3 "Lifecycles"). Implementors may carry arbitrary extra
//! domain fields; the engine only ever reaches through this trait.

use crate::ids::{LocaleTag, PlatformTag, StableId};
use crate::version::Version;

/// Minimum surface the rule engine requires of an evaluation context.
///
/// Feature handles are polymorphic over `C: Context`; a feature declared
/// against one context type can only be evaluated with a value of that same
/// type (spec.md §3).
pub trait Context {
    fn locale(&self) -> &LocaleTag;
    fn platform(&self) -> &PlatformTag;
    fn app_version(&self) -> Version;
    fn stable_id(&self) -> &StableId;

    /// Dimensional targeting accessor used by `axes` criteria (spec.md §3).
    /// Absence of the key (not an empty string) is what makes an axis
    /// criterion fail to match.
    fn get_axis(&self, key: &str) -> Option<&str>;
}
