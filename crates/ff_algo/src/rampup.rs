//! Deterministic ramp-up bucketing (spec.md §4.3).
//!
//! `stable_bucket` is a pure function of `(feature_key, stable_id, salt)`:
//! same inputs always produce the same bucket, on any platform, in any
//! process. It has no dependency on system time, randomness, or thread
//! state.

use alloc::format;
use ff_core::ids::StableId;
use sha2::{Digest, Sha256};

/// Number of buckets ramp-up percentages are resolved against (spec.md
/// §4.3: granularity is 0.01%, i.e. 10_000 buckets).
pub const BUCKET_MODULUS: u32 = 10_000;

/// `stable_bucket(feature_key, stable_id, salt)` — spec.md §4.3 steps 1-4:
/// hash `"{salt}:{feature_key}:{stable_id}"` with SHA-256, read the first
/// four digest bytes as a big-endian u32, reduce modulo 10_000.
pub fn stable_bucket(feature_key: &str, stable_id: &StableId, salt: &str) -> u32 {
    let input = format!("{salt}:{feature_key}:{}", stable_id.as_str());
    let digest = Sha256::digest(input.as_bytes());
    let head = [digest[0], digest[1], digest[2], digest[3]];
    u32::from_be_bytes(head) % BUCKET_MODULUS
}

/// Whether a context at `bucket` is eligible under a ramp-up of `percent`
/// (spec.md §4.2 step 3f, §4.3 "Eligibility"). `percent` is assumed already
/// validated into `[0.0, 100.0]` by `ff_core::rampup::RampUp`.
pub fn bucket_is_eligible(bucket: u32, percent: f64) -> bool {
    let threshold = (percent * 100.0).floor();
    (bucket as f64) < threshold
}
