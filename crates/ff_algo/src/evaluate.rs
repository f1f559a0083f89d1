//! The deterministic match loop (spec.md §4.2).
//!
//! `evaluate_definition` assumes its caller has already resolved a
//! `FlagDefinition` from a snapshot (the `FlagNotFound` case in spec.md
//! §4.2 step 1 is a registry-level lookup, not something this crate can
//! produce on its own — see `ff_registry::engine::evaluate`).

use crate::definition::FlagDefinition;
use crate::rampup::{bucket_is_eligible, stable_bucket};
use alloc::string::String;
#[cfg(feature = "std")]
use alloc::string::ToString;
use ff_core::context::Context;
use ff_core::value::FlagValue;

/// Outcome of matching a single `FlagDefinition` against a context.
#[derive(Clone, Debug)]
pub enum EvaluationOutcome {
    /// A rule matched; `rule_index` is its position in the definition's
    /// pre-sorted rule list, `bucket` is the ramp-up bucket computed for
    /// the winning rule (`None` if the rule's ramp-up gate was bypassed via
    /// allowlist or resolved without hashing at 0%/100%).
    Matched { value: FlagValue, rule_index: usize, bucket: Option<u32> },
    /// No rule matched, or the definition is inactive; the default value
    /// was returned.
    Default { value: FlagValue },
    /// An extension predicate panicked; the fault is isolated here rather
    /// than propagated (spec.md §4.2 step 3e, §7 "Extension fault").
    Error { rule_index: usize, cause: String },
}

/// Run the spec.md §4.2 match loop against an already-resolved definition.
pub fn evaluate_definition(definition: &FlagDefinition, context: &dyn Context) -> EvaluationOutcome {
    if !definition.active {
        return EvaluationOutcome::Default { value: definition.default_value.clone() };
    }

    for (rule_index, rule) in definition.rules().iter().enumerate() {
        let criteria = &rule.criteria;

        if !criteria.platforms.is_empty() && !criteria.platforms.contains(context.platform()) {
            continue;
        }
        if !criteria.locales.is_empty() && !criteria.locales.contains(context.locale()) {
            continue;
        }
        if !criteria.version_range.contains(context.app_version()) {
            continue;
        }
        let axes_match = criteria.axes.iter().all(|(axis_key, allowed)| {
            allowed.is_empty() || context.get_axis(axis_key).map(|v| allowed.contains(v)).unwrap_or(false)
        });
        if !axes_match {
            continue;
        }
        if let Some(extension) = &criteria.extension {
            match invoke_extension(extension, context) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(cause) => return EvaluationOutcome::Error { rule_index, cause },
            }
        }

        let stable_id = context.stable_id();
        if criteria.allowlist.contains(stable_id) {
            return EvaluationOutcome::Matched { value: rule.value.clone(), rule_index, bucket: None };
        }
        let percent = criteria.ramp_up.value();
        if percent >= 100.0 {
            return EvaluationOutcome::Matched { value: rule.value.clone(), rule_index, bucket: None };
        }
        if percent <= 0.0 {
            continue;
        }
        let bucket = stable_bucket(&definition.feature_key, stable_id, &definition.salt);
        if bucket_is_eligible(bucket, percent) {
            return EvaluationOutcome::Matched { value: rule.value.clone(), rule_index, bucket: Some(bucket) };
        }
    }

    EvaluationOutcome::Default { value: definition.default_value.clone() }
}

#[cfg(feature = "std")]
fn invoke_extension(extension: &crate::criteria::ContextPredicate, context: &dyn Context) -> Result<bool, String> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| extension.call(context))).map_err(|payload| {
        if let Some(msg) = payload.downcast_ref::<&str>() {
            msg.to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "extension predicate panicked with a non-string payload".to_string()
        }
    })
}

/// Without `std`, there is no `catch_unwind` to isolate a panic with; the
/// predicate is invoked directly and a fault propagates as a Rust panic
/// rather than an `EvaluationOutcome::Error`. Hosts that need the panic
/// isolation guarantee in spec.md §4.2 must build with the `std` feature.
#[cfg(not(feature = "std"))]
fn invoke_extension(extension: &crate::criteria::ContextPredicate, context: &dyn Context) -> Result<bool, String> {
    Ok(extension.call(context))
}
