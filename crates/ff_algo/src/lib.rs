//! ff_algo — rule & criterion model, specificity, ramp-up bucketing, and the
//! deterministic match loop (spec.md §4.2, §4.3).
//!
//! This crate has no I/O and no logging dependency, matching `ff_core`; it
//! only knows how to decide, given a `FlagDefinition` and a `Context`, which
//! rule (if any) wins.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod criteria;
pub mod definition;
pub mod evaluate;
pub mod rampup;
pub mod rule;

pub mod prelude {
    pub use crate::criteria::{Criteria, ContextPredicate};
    pub use crate::definition::FlagDefinition;
    pub use crate::evaluate::{evaluate_definition, EvaluationOutcome};
    pub use crate::rampup::stable_bucket;
    pub use crate::rule::Rule;
}
