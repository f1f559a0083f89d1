//! `FlagDefinition` — a feature's full per-namespace configuration
//! (spec.md §3 "FlagDefinition").

use crate::rule::Rule;
use alloc::string::String;
use alloc::vec::Vec;
use ff_core::determinism::sort_stable;
use ff_core::value::FlagValue;

/// Default salt applied when a definition does not specify one (spec.md
/// §6 snapshot JSON schema: `"salt"` optional, default `"v1"`).
pub const DEFAULT_SALT: &str = "v1";

/// A feature's installed configuration: default value, active flag, salt,
/// and a totally-ordered rule list. Once constructed via `new`, `rules` is
/// pre-sorted by descending specificity with `note` as the tie-break and is
/// never re-sorted at evaluation time (spec.md §4.2 "Ordering guarantees",
/// §9 "Deterministic rule ordering").
#[derive(Clone)]
pub struct FlagDefinition {
    pub feature_key: String,
    pub default_value: FlagValue,
    pub active: bool,
    pub salt: String,
    rules: Vec<Rule>,
}

impl FlagDefinition {
    /// Construct a definition, sorting `rules` by the stable specificity
    /// order once and for all.
    pub fn new(feature_key: impl Into<String>, default_value: FlagValue, active: bool, salt: impl Into<String>, mut rules: Vec<Rule>) -> Self {
        sort_stable(&mut rules);
        Self { feature_key: feature_key.into(), default_value, active, salt: salt.into(), rules }
    }

    /// Rules in their installed, pre-sorted order. Never mutate this list
    /// in place — construct a new `FlagDefinition` instead (spec.md §3
    /// invariant: "`rules` is an immutable, totally-ordered sequence once
    /// the definition is installed in a snapshot").
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Criteria;
    use ff_core::ids::PlatformTag;

    #[test]
    fn rules_are_sorted_at_construction() {
        let low = Rule::new(FlagValue::Boolean(false), Criteria::default(), None);
        let mut high_criteria = Criteria::default();
        high_criteria.platforms.insert(PlatformTag::new("IOS").unwrap());
        let high = Rule::new(FlagValue::Boolean(true), high_criteria, None);

        let def = FlagDefinition::new("flag", FlagValue::Boolean(false), true, DEFAULT_SALT, alloc::vec![low, high]);
        assert_eq!(def.rules()[0].specificity(), 1);
        assert_eq!(def.rules()[1].specificity(), 0);
    }
}
