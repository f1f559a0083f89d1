//! ff_registry — the atomically-swappable namespace registry and the
//! public typed evaluation API built on top of `ff_algo`/`ff_io`
//! (spec.md §3 "Namespace registry", §4.1, §4.2, §6).

#![forbid(unsafe_code)]

pub mod engine;
pub mod errors;
pub mod namespace;

pub mod prelude {
    pub use crate::engine::{evaluate, evaluate_or_default, explain, EvaluationExplanation, EvaluationResult};
    pub use crate::errors::RegistryError;
    pub use crate::namespace::Namespace;
}
