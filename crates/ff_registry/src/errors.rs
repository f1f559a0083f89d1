//! Errors the registry layer can produce (spec.md §4.1 "Failure modes",
//! §7 "Not-found").

use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryError {
    /// `rollback(n)` requested a generation further back than the bounded
    /// history retains (spec.md §3 "Namespace registry": history length is
    /// an implementation-chosen constant).
    NoHistory,
    /// `apply_patch` referenced a key with no corresponding definition in
    /// the current snapshot and no full `FlagDefinition` supplied for it
    /// (spec.md §4.1). Given this implementation's `Patch` schema only
    /// carries full upserts (spec.md §6), this variant is reserved for a
    /// future partial-update patch shape and is not raised by `apply_patch`
    /// as implemented — see DESIGN.md.
    FeatureNotFound { key: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::NoHistory => write!(f, "no snapshot that far back in history"),
            RegistryError::FeatureNotFound { key } => write!(f, "feature not found: {key}"),
        }
    }
}

impl std::error::Error for RegistryError {}
