//! The public typed evaluation API (spec.md §4.2 "Evaluation", §6).
//!
//! `Feature<T, C>` declares a type-erased flag's typed shape; `evaluate`
//! looks the feature's `FlagDefinition` up in a namespace's current
//! snapshot, runs it through `ff_algo::evaluate_definition`, and converts
//! the resulting `FlagValue` back to `T`, checking the declared `TypeKind`
//! along the way as defense in depth (spec.md §9).

use crate::namespace::Namespace;
use ff_algo::evaluate::{evaluate_definition, EvaluationOutcome};
use ff_core::context::Context;
use ff_core::feature::Feature;
use ff_core::value::FlagValue;

/// Outcome of a typed evaluation call (spec.md §4.2 "Failure modes").
#[derive(Clone, Debug)]
pub enum EvaluationResult<T> {
    Success(T),
    FlagNotFound(String),
    EvaluationError { rule_index: usize, cause: String },
}

impl<T> EvaluationResult<T> {
    /// Collapse any non-`Success` outcome to `default`, matching a host's
    /// typical "never block on a flag" usage (spec.md §9 "Caller-chosen
    /// fallback").
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            EvaluationResult::Success(v) => v,
            _ => default,
        }
    }
}

/// Evaluate `feature` against `context` using `namespace`'s current
/// snapshot. Returns `FlagNotFound` if the feature's key has no installed
/// `FlagDefinition`, and `EvaluationError` if an extension predicate
/// panicked or the stored value's runtime kind didn't match what `feature`
/// declares (the latter should be unreachable given validated snapshots,
/// but is checked regardless — spec.md §9).
pub fn evaluate<T, C>(namespace: &Namespace, feature: &dyn Feature<T, C>, context: &C) -> EvaluationResult<T>
where
    C: Context,
    T: TryFrom<FlagValue>,
{
    let snapshot = namespace.current();
    let definition = match snapshot.get(feature.key()) {
        Some(d) => d,
        None => return EvaluationResult::FlagNotFound(feature.key().to_string()),
    };

    let value = match evaluate_definition(definition, context) {
        EvaluationOutcome::Matched { value, .. } => value,
        EvaluationOutcome::Default { value } => value,
        EvaluationOutcome::Error { rule_index, cause } => {
            return EvaluationResult::EvaluationError { rule_index, cause };
        }
    };

    if !value.matches_kind(feature.type_kind()) {
        return EvaluationResult::EvaluationError {
            rule_index: usize::MAX,
            cause: format!("stored value kind {} does not match declared type {}", value.kind(), feature.type_kind()),
        };
    }

    match T::try_from(value) {
        Ok(typed) => EvaluationResult::Success(typed),
        Err(_) => EvaluationResult::EvaluationError {
            rule_index: usize::MAX,
            cause: "stored value failed conversion to the feature's declared type".to_string(),
        },
    }
}

/// `evaluate`, collapsing any non-success outcome to `default` (spec.md §6
/// convenience wrapper most call sites use).
pub fn evaluate_or_default<T, C>(namespace: &Namespace, feature: &dyn Feature<T, C>, context: &C, default: T) -> T
where
    C: Context,
    T: TryFrom<FlagValue>,
{
    evaluate(namespace, feature, context).unwrap_or(default)
}

/// A diagnostic view of how a feature resolved, without collapsing to `T`
/// (SPEC_FULL.md §6 supplemented observability: tooling and debug UIs want
/// to show which rule won and why, not just the winning value).
#[derive(Clone, Debug)]
pub struct EvaluationExplanation {
    pub feature_key: String,
    pub matched_rule_index: Option<usize>,
    pub bucket: Option<u32>,
    pub value: FlagValue,
    /// The matched rule's author-supplied note, if any (spec.md §3 `Rule.note`).
    pub note: Option<String>,
}

/// Evaluate `feature` against `context`, returning the full explanation
/// instead of a typed value. Returns `None` if the feature has no
/// installed definition.
pub fn explain<T, C>(namespace: &Namespace, feature: &dyn Feature<T, C>, context: &C) -> Option<EvaluationExplanation>
where
    C: Context,
{
    let snapshot = namespace.current();
    let definition = snapshot.get(feature.key())?;

    let (matched_rule_index, bucket, value, note) = match evaluate_definition(definition, context) {
        EvaluationOutcome::Matched { value, rule_index, bucket } => {
            let note = definition.rules().get(rule_index).and_then(|r| r.note.clone());
            (Some(rule_index), bucket, value, note)
        }
        EvaluationOutcome::Default { value } => (None, None, value, None),
        EvaluationOutcome::Error { rule_index, cause } => {
            let note = definition.rules().get(rule_index).and_then(|r| r.note.clone());
            (Some(rule_index), None, FlagValue::String(format!("<error: {cause}>")), note)
        }
    };

    Some(EvaluationExplanation { feature_key: feature.key().to_string(), matched_rule_index, bucket, value, note })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::Namespace;
    use ff_algo::criteria::Criteria;
    use ff_algo::rule::Rule;
    use ff_core::feature::{NamespaceId, StaticFeature};
    use ff_core::ids::{LocaleTag, PlatformTag, StableId};
    use ff_core::value::TypeKind;
    use ff_core::version::Version;
    use ff_io::snapshot::Patch;

    struct TestContext {
        platform: PlatformTag,
        locale: LocaleTag,
        stable_id: StableId,
    }

    impl Context for TestContext {
        fn locale(&self) -> &LocaleTag {
            &self.locale
        }
        fn platform(&self) -> &PlatformTag {
            &self.platform
        }
        fn app_version(&self) -> Version {
            Version::new(1, 0, 0)
        }
        fn stable_id(&self) -> &StableId {
            &self.stable_id
        }
        fn get_axis(&self, _key: &str) -> Option<&str> {
            None
        }
    }

    fn ctx() -> TestContext {
        TestContext {
            platform: PlatformTag::new("IOS").unwrap(),
            locale: LocaleTag::new("en_US").unwrap(),
            stable_id: StableId::new("user-1").unwrap(),
        }
    }

    #[test]
    fn missing_feature_reports_flag_not_found() {
        let ns = Namespace::unnamed();
        let feature: StaticFeature<bool, TestContext> =
            StaticFeature::new("dark_mode", NamespaceId::default_namespace(), false, TypeKind::Boolean);
        let result = evaluate(&ns, &feature, &ctx());
        assert!(matches!(result, EvaluationResult::FlagNotFound(k) if k == "dark_mode"));
    }

    #[test]
    fn installed_flag_evaluates_to_its_default() {
        let ns = Namespace::unnamed();
        let def = ff_algo::definition::FlagDefinition::new("dark_mode", FlagValue::Boolean(true), true, "v1", vec![]);
        ns.apply_patch(&Patch { upserts: vec![def], removes: vec![] }).unwrap();

        let feature: StaticFeature<bool, TestContext> =
            StaticFeature::new("dark_mode", NamespaceId::default_namespace(), false, TypeKind::Boolean);
        let result = evaluate(&ns, &feature, &ctx());
        assert!(matches!(result, EvaluationResult::Success(true)));
    }

    #[test]
    fn evaluate_or_default_falls_back_when_flag_not_found() {
        let ns = Namespace::unnamed();
        let feature: StaticFeature<bool, TestContext> =
            StaticFeature::new("missing", NamespaceId::default_namespace(), false, TypeKind::Boolean);
        assert_eq!(evaluate_or_default(&ns, &feature, &ctx(), true), true);
    }

    #[test]
    fn explain_reports_matched_rule_note() {
        let ns = Namespace::unnamed();
        let rule = Rule::new(FlagValue::Boolean(true), Criteria::default(), Some("rollout".to_string()));
        let def = ff_algo::definition::FlagDefinition::new("dark_mode", FlagValue::Boolean(false), true, "v1", vec![rule]);
        ns.apply_patch(&Patch { upserts: vec![def], removes: vec![] }).unwrap();

        let feature: StaticFeature<bool, TestContext> =
            StaticFeature::new("dark_mode", NamespaceId::default_namespace(), false, TypeKind::Boolean);
        let explanation = explain(&ns, &feature, &ctx()).unwrap();
        assert_eq!(explanation.matched_rule_index, Some(0));
        assert_eq!(explanation.note.as_deref(), Some("rollout"));
    }
}
