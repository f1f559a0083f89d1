//! ff_core — identifier/context primitives, closed value kinds, and feature
//! identity shared across the evaluation core (`ff_algo`, `ff_io`,
//! `ff_registry`).
//!
//! This crate has no I/O and no logging dependency: it is pure data plus
//! parsing/validation. Serialization derives are gated behind the `serde`
//! feature so a caller who only needs in-process evaluation (no JSON
//! snapshots) can opt out.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod context;
pub mod determinism;
pub mod errors;
pub mod feature;
pub mod ids;
pub mod rampup;
pub mod value;
pub mod version;

pub mod prelude {
    pub use crate::context::Context;
    pub use crate::determinism::StableOrd;
    pub use crate::errors::CoreError;
    pub use crate::feature::{Feature, NamespaceId, StaticFeature};
    pub use crate::ids::{LocaleTag, PlatformTag, StableId};
    pub use crate::rampup::RampUp;
    pub use crate::value::{FlagValue, TypeKind};
    pub use crate::version::{Version, VersionRange};
}
