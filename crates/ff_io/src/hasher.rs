//! SHA-256 helpers shared by the canonical-JSON hash and ramp-up bucketing
//! (the latter lives in `ff_algo::rampup`; this module only covers hashing
//! a whole snapshot's canonical bytes, e.g. for cache keys or audit logs).

use digest::Digest;
use sha2::Sha256;

/// Lowercase 64-hex SHA-256 of arbitrary bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// SHA-256 of a value's canonical JSON form.
pub fn sha256_canonical(v: &serde_json::Value) -> String {
    sha256_hex(&crate::canonical_json::to_canonical_bytes(v))
}
