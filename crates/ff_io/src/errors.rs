//! `ParseError` and `ParseResult` (spec.md §4.5).
//!
//! The serialization boundary never panics and never returns a partially
//! valid `Snapshot`: every failure path here is a value, and `Success`
//! implies every invariant in spec.md §3 already holds.

use ff_core::version::Version;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {message}")]
    InvalidJson { message: String },

    #[error("invalid snapshot at {path}: {message}")]
    InvalidSnapshot { message: String, path: String },

    #[error("feature not found: {key}")]
    FeatureNotFound { key: String },

    #[error("invalid version: {text}")]
    InvalidVersion { text: String },

    #[error("invalid version range: min {min} exceeds max {max}")]
    InvalidRange { min: Version, max: Version },

    #[error("invalid ramp-up: {value} is outside [0, 100]")]
    InvalidRampUp { value: f64 },

    #[error("type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch { key: String, expected: String, actual: String },
}

/// `Result` is the Rust realization of spec.md §4.5's `Success`/`Failure`
/// discriminated union: `Ok` carries a fully-validated value, `Err` a
/// categorized `ParseError`. Nothing in this crate ever panics or unwinds
/// to produce one.
pub type ParseResult<T> = Result<T, ParseError>;
