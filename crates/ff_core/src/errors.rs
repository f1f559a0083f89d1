//! Minimal error set for core-domain validation & parsing.
//!
//! `CoreError` is deliberately small: every variant corresponds to a
//! construction-time invariant from spec.md §3 (identifier/version/ramp-up
//! shape). Higher layers (`ff_io::ParseError`, `ff_registry::RegistryError`)
//! wrap or re-derive these as needed rather than duplicating the checks.

use core::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreError {
    /// A `LocaleTag`/`PlatformTag` was constructed from a blank string.
    BlankTag,
    /// A `StableId` was constructed from a blank string.
    BlankStableId,
    /// A `Version` string did not match `"MAJOR.MINOR.PATCH"`.
    InvalidVersion,
    /// A `VersionRange::FullyBound` had `min > max`.
    InvalidRange,
    /// A `RampUp` value fell outside `[0.0, 100.0]`.
    InvalidRampUp,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::BlankTag => write!(f, "tag must not be blank"),
            CoreError::BlankStableId => write!(f, "stable id must not be blank"),
            CoreError::InvalidVersion => write!(f, "version must be of the form MAJOR.MINOR.PATCH"),
            CoreError::InvalidRange => write!(f, "version range: min must not exceed max"),
            CoreError::InvalidRampUp => write!(f, "ramp-up must be within [0.0, 100.0]"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
