//! End-to-end scenarios from spec.md §8 ("Concrete end-to-end scenarios"),
//! exercised through the public `ff_registry` API rather than any single
//! crate's internals.

use ff_algo::criteria::Criteria;
use ff_algo::definition::FlagDefinition;
use ff_algo::rule::Rule;
use ff_core::context::Context;
use ff_core::feature::{NamespaceId, StaticFeature};
use ff_core::ids::{LocaleTag, PlatformTag, StableId};
use ff_core::value::{FlagValue, TypeKind};
use ff_core::version::{Version, VersionRange};
use ff_io::snapshot::Patch;
use ff_registry::engine::{evaluate, EvaluationResult};
use ff_registry::namespace::Namespace;

struct Ctx {
    locale: LocaleTag,
    platform: PlatformTag,
    app_version: Version,
    stable_id: StableId,
}

impl Context for Ctx {
    fn locale(&self) -> &LocaleTag {
        &self.locale
    }
    fn platform(&self) -> &PlatformTag {
        &self.platform
    }
    fn app_version(&self) -> Version {
        self.app_version
    }
    fn stable_id(&self) -> &StableId {
        &self.stable_id
    }
    fn get_axis(&self, _key: &str) -> Option<&str> {
        None
    }
}

fn ctx(platform: &str, app_version: &str, stable_id: &str) -> Ctx {
    Ctx {
        locale: LocaleTag::new("en_US").unwrap(),
        platform: PlatformTag::new(platform).unwrap(),
        app_version: app_version.parse().unwrap(),
        stable_id: StableId::new(stable_id).unwrap(),
    }
}

fn install(ns: &Namespace, def: FlagDefinition) {
    ns.apply_patch(&Patch { upserts: vec![def], removes: vec![] }).unwrap();
}

#[test]
fn scenario_1_default_fallthrough() {
    let ns = Namespace::unnamed();
    install(&ns, FlagDefinition::new("dark_mode", FlagValue::Boolean(false), true, "v1", vec![]));

    let feature: StaticFeature<bool, Ctx> =
        StaticFeature::new("dark_mode", NamespaceId::default_namespace(), false, TypeKind::Boolean);
    let result = evaluate(&ns, &feature, &ctx("IOS", "2.1.0", "user-1"));
    assert!(matches!(result, EvaluationResult::Success(false)));
}

#[test]
fn scenario_2_platform_gated_rule_wins() {
    let ns = Namespace::unnamed();
    let mut criteria = Criteria::default();
    criteria.platforms.insert(PlatformTag::new("IOS").unwrap());
    let rule = Rule::new(FlagValue::Boolean(true), criteria, None);
    install(&ns, FlagDefinition::new("dark_mode", FlagValue::Boolean(false), true, "v1", vec![rule]));

    let feature: StaticFeature<bool, Ctx> =
        StaticFeature::new("dark_mode", NamespaceId::default_namespace(), false, TypeKind::Boolean);

    let ios = evaluate(&ns, &feature, &ctx("IOS", "2.1.0", "user-1"));
    assert!(matches!(ios, EvaluationResult::Success(true)));

    let android = evaluate(&ns, &feature, &ctx("ANDROID", "2.1.0", "user-1"));
    assert!(matches!(android, EvaluationResult::Success(false)));
}

#[test]
fn scenario_3_specificity_beats_declaration_order() {
    let ns = Namespace::unnamed();

    let mut low = Criteria::default();
    low.platforms.insert(PlatformTag::new("IOS").unwrap());
    let rule_a = Rule::new(FlagValue::String("ios".to_string()), low, None);

    let mut high = Criteria::default();
    high.platforms.insert(PlatformTag::new("IOS").unwrap());
    high.version_range = VersionRange::LeftBound { min: Version::new(2, 0, 0) };
    let rule_b = Rule::new(FlagValue::String("ios-v2".to_string()), high, None);

    install(
        &ns,
        FlagDefinition::new("api_url", FlagValue::String("prod".to_string()), true, "v1", vec![rule_a, rule_b]),
    );

    let feature: StaticFeature<String, Ctx> =
        StaticFeature::new("api_url", NamespaceId::default_namespace(), "prod".to_string(), TypeKind::String);

    let new = evaluate(&ns, &feature, &ctx("IOS", "2.1.0", "user-1"));
    assert!(matches!(new, EvaluationResult::Success(ref s) if s == "ios-v2"));

    let old = evaluate(&ns, &feature, &ctx("IOS", "1.9.0", "user-1"));
    assert!(matches!(old, EvaluationResult::Success(ref s) if s == "ios"));
}

#[test]
fn scenario_4_rampup_determinism_and_distribution() {
    let ns = Namespace::unnamed();
    let mut criteria = Criteria::default();
    criteria.ramp_up = ff_core::rampup::RampUp::new(50.0).unwrap();
    let rule = Rule::new(FlagValue::Boolean(true), criteria, None);
    install(&ns, FlagDefinition::new("exp", FlagValue::Boolean(false), true, "v1", vec![rule]));

    let feature: StaticFeature<bool, Ctx> =
        StaticFeature::new("exp", NamespaceId::default_namespace(), false, TypeKind::Boolean);

    let run = |ns: &Namespace| -> Vec<bool> {
        (0..10_000)
            .map(|i| {
                let c = ctx("IOS", "2.1.0", &format!("u-{i}"));
                matches!(evaluate(ns, &feature, &c), EvaluationResult::Success(true))
            })
            .collect()
    };

    let first = run(&ns);
    let second = run(&ns);
    assert_eq!(first, second);

    let count = first.iter().filter(|b| **b).count();
    assert!((4_800..=5_200).contains(&count), "count was {count}");
}

#[test]
fn scenario_5_salt_change_redistributes() {
    let make_ns = |salt: &str| {
        let ns = Namespace::unnamed();
        let mut criteria = Criteria::default();
        criteria.ramp_up = ff_core::rampup::RampUp::new(50.0).unwrap();
        let rule = Rule::new(FlagValue::Boolean(true), criteria, None);
        install(&ns, FlagDefinition::new("exp", FlagValue::Boolean(false), true, salt, vec![rule]));
        ns
    };

    let ns_v1 = make_ns("v1");
    let ns_v2 = make_ns("v2");

    let feature: StaticFeature<bool, Ctx> =
        StaticFeature::new("exp", NamespaceId::default_namespace(), false, TypeKind::Boolean);

    let mut differing = 0;
    for i in 0..10_000 {
        let c = ctx("IOS", "2.1.0", &format!("u-{i}"));
        let a = matches!(evaluate(&ns_v1, &feature, &c), EvaluationResult::Success(true));
        let b = matches!(evaluate(&ns_v2, &feature, &c), EvaluationResult::Success(true));
        if a != b {
            differing += 1;
        }
    }
    let fraction = differing as f64 / 10_000.0;
    assert!((0.45..=0.55).contains(&fraction), "fraction was {fraction}");
}

#[test]
fn scenario_6_patch_add_remove_rollback() {
    let ns = Namespace::unnamed();
    install(&ns, FlagDefinition::new("a", FlagValue::Boolean(true), true, "v1", vec![]));
    install(&ns, FlagDefinition::new("b", FlagValue::Boolean(true), true, "v1", vec![]));

    let c = FlagDefinition::new("c", FlagValue::Boolean(true), true, "v1", vec![]);
    ns.apply_patch(&Patch { upserts: vec![c], removes: vec!["a".to_string()] }).unwrap();

    let current = ns.current();
    assert!(current.get("a").is_none());
    assert!(current.get("b").is_some());
    assert!(current.get("c").is_some());

    ns.rollback(1).unwrap();
    let restored = ns.current();
    assert!(restored.get("a").is_some());
    assert!(restored.get("b").is_some());
    assert!(restored.get("c").is_none());
    assert!(ns.history_len() >= 1);
}

#[test]
fn scenario_7_parse_failure_leaves_state_unchanged() {
    use ff_io::declared::DeclaredFeatures;
    use ff_io::errors::ParseError;
    use ff_io::snapshot::Snapshot;

    let ns = Namespace::unnamed();
    install(&ns, FlagDefinition::new("a", FlagValue::Boolean(true), true, "v1", vec![]));
    let before = ns.current().len();

    let declared = DeclaredFeatures::new();
    let err = Snapshot::from_json("{", &declared).unwrap_err();
    assert!(matches!(err, ParseError::InvalidJson { .. }));

    assert_eq!(ns.current().len(), before);
}
