//! Determinism utilities: a stable total order for anything that exposes a
//! comparable key. `ff_algo` uses this to pre-sort a `FlagDefinition`'s rules
//! by descending specificity with `note` as the lexicographic tie-break
//! (spec.md §3 "FlagDefinition", §4.2 "Ordering guarantees").

/// Types participating in a stable, deterministic selection expose a total
/// order key here rather than implementing `Ord` directly — this keeps the
/// "what to sort by" decision explicit and reviewable at each call site.
pub trait StableOrd {
    type Key: Ord;
    fn stable_key(&self) -> Self::Key;
}

/// Stable-sort `items` by ascending `stable_key()`. Callers wanting
/// descending order (e.g. specificity, highest first) should wrap the
/// relevant key component in `core::cmp::Reverse`, as `ff_algo::rule::Rule`
/// does for its specificity sort key.
pub fn sort_stable<T: StableOrd>(items: &mut [T]) {
    items.sort_by(|a, b| a.stable_key().cmp(&b.stable_key()));
}
