//! ff_io — canonical JSON, the wire value-kind union, and the
//! push-validated `Snapshot`/`Patch` serialization boundary (spec.md §4.5,
//! §4.6, §6).
//!
//! Like `ff_core` and `ff_algo`, this crate never panics on untrusted
//! input: every failure path is a `ParseError` value (spec.md §7
//! "Propagation policy": "the core never throws").

#![forbid(unsafe_code)]

pub mod canonical_json;
pub mod declared;
pub mod errors;
pub mod hasher;
pub mod snapshot;
pub mod wire;

pub mod prelude {
    pub use crate::declared::DeclaredFeatures;
    pub use crate::errors::{ParseError, ParseResult};
    pub use crate::snapshot::{Patch, Snapshot};
    pub use crate::wire::FlagValueWire;
}
