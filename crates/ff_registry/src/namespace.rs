//! `Namespace` — atomically-swappable current snapshot plus bounded
//! rollback history (spec.md §3 "Namespace registry", §4.1, §5).
//!
//! The whole registry state (current snapshot + history) swaps as a unit
//! via `ArcSwap`, matching spec.md §9 "Atomic snapshot publish" and §5's
//! requirement that history updates happen via the same atomic step as the
//! snapshot swap. No per-feature locks exist; readers take one atomic load
//! and do all their work on the resulting immutable `Arc<Snapshot>`.

use crate::errors::RegistryError;
use arc_swap::ArcSwap;
use ff_algo::definition::FlagDefinition;
use ff_io::snapshot::{Patch, Snapshot};
use std::sync::Arc;

/// Bounded rollback depth (spec.md §3: "length is an implementation-chosen
/// constant; 16 is reasonable").
pub const HISTORY_CAPACITY: usize = 16;

struct State {
    current: Arc<Snapshot>,
    /// Most recent prior snapshot first.
    history: Vec<Arc<Snapshot>>,
}

/// A namespace owns one atomically-swappable snapshot and its rollback
/// history. Namespaces are values, not singletons (spec.md §9): construct
/// as many as the host's isolation boundaries require.
pub struct Namespace {
    state: ArcSwap<State>,
}

impl Namespace {
    pub fn new(initial: Snapshot) -> Self {
        Self { state: ArcSwap::new(Arc::new(State { current: Arc::new(initial), history: Vec::new() })) }
    }

    /// Convenience constructor seeding an empty snapshot. Documented
    /// explicitly as ordinary, caller-owned state — not a process-wide
    /// default (spec.md §9, SPEC_FULL.md §6).
    pub fn unnamed() -> Self {
        Self::new(Snapshot::new())
    }

    /// Atomically install `snapshot` as current, pushing the previous
    /// current into the bounded history ring (spec.md §4.1 `load`).
    ///
    /// Uses `rcu` rather than a load-then-store pair: two concurrent
    /// installs racing on a plain read-modify-write would both read the
    /// same `prev` and the later `store` would clobber the earlier one,
    /// losing a snapshot and its history entry with no sequential order
    /// producing that outcome. `rcu` retries the whole computation against
    /// the latest value on conflict, so the swap is a single atomic publish
    /// (spec.md §5 "compare-and-swap… via the same atomic step").
    pub fn load(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        self.state.rcu(|prev| {
            let mut history = Vec::with_capacity(HISTORY_CAPACITY);
            history.push(prev.current.clone());
            history.extend(prev.history.iter().take(HISTORY_CAPACITY - 1).cloned());
            Arc::new(State { current: snapshot.clone(), history })
        });
    }

    /// Compute `next = current.with(patch)` then `load(next)` (spec.md
    /// §4.1 `apply_patch`). See `RegistryError::FeatureNotFound` for why
    /// this always succeeds given this crate's `Patch` shape.
    pub fn apply_patch(&self, patch: &Patch) -> Result<(), RegistryError> {
        let current = self.current();
        let next = current.with(patch);
        self.load(next);
        Ok(())
    }

    /// The currently-active snapshot. Cheap: an `Arc` clone off the atomic
    /// pointer, no copying of the underlying map.
    pub fn current(&self) -> Arc<Snapshot> {
        self.state.load().current.clone()
    }

    pub fn get(&self, key: &str) -> Option<FlagDefinition> {
        self.current().get(key).cloned()
    }

    /// Install the `n`-th most recent prior snapshot as current (`n = 1`
    /// is the immediately preceding snapshot). The rollback is itself
    /// recorded in history, so a second rollback can undo it (spec.md §4.1
    /// "Guarantees": "Rollback is itself a linearizable install... it
    /// becomes the new current and is itself recorded in history").
    pub fn rollback(&self, n: usize) -> Result<(), RegistryError> {
        if n == 0 {
            return Err(RegistryError::NoHistory);
        }
        let snapshot = {
            let state = self.state.load();
            let target = state.history.get(n - 1).ok_or(RegistryError::NoHistory)?;
            (**target).clone()
        };
        self.load(snapshot);
        Ok(())
    }

    /// Number of prior snapshots currently retained for rollback
    /// (SPEC_FULL.md §6 supplemented introspection).
    pub fn history_len(&self) -> usize {
        self.state.load().history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_core::value::FlagValue;
    use std::sync::Barrier;
    use std::thread;

    fn def(key: &str, value: bool) -> FlagDefinition {
        FlagDefinition::new(key, FlagValue::Boolean(value), true, "v1", vec![])
    }

    fn snapshot_with(defs: Vec<FlagDefinition>) -> Snapshot {
        let patch = Patch { upserts: defs, removes: vec![] };
        Snapshot::new().with(&patch)
    }

    #[test]
    fn load_then_current_observes_the_installed_snapshot() {
        let ns = Namespace::unnamed();
        ns.load(snapshot_with(vec![def("a", true)]));
        assert_eq!(ns.get("a").unwrap().default_value, FlagValue::Boolean(true));
    }

    #[test]
    fn patch_add_remove_rollback_sequence() {
        let ns = Namespace::unnamed();
        ns.load(snapshot_with(vec![def("a", true), def("b", true)]));

        let patch = Patch { upserts: vec![def("c", true)], removes: vec!["a".to_string()] };
        ns.apply_patch(&patch).unwrap();
        let current = ns.current();
        assert!(current.get("a").is_none());
        assert!(current.get("b").is_some());
        assert!(current.get("c").is_some());

        ns.rollback(1).unwrap();
        let restored = ns.current();
        assert!(restored.get("a").is_some());
        assert!(restored.get("b").is_some());
        assert!(restored.get("c").is_none());
    }

    #[test]
    fn rollback_beyond_history_fails() {
        let ns = Namespace::unnamed();
        assert_eq!(ns.rollback(1).unwrap_err(), RegistryError::NoHistory);
    }

    #[test]
    fn history_is_bounded() {
        let ns = Namespace::unnamed();
        for i in 0..(HISTORY_CAPACITY + 5) {
            ns.load(snapshot_with(vec![def(&format!("f{i}"), true)]));
        }
        assert_eq!(ns.history_len(), HISTORY_CAPACITY);
    }

    #[test]
    fn concurrent_readers_never_see_a_torn_snapshot() {
        let ns = Arc::new(Namespace::unnamed());
        ns.load(snapshot_with(vec![def("a", false)]));
        let barrier = Arc::new(Barrier::new(5));

        let writer = {
            let ns = ns.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                ns.load(snapshot_with(vec![def("a", true)]));
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let ns = ns.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..1000 {
                        let snap = ns.current();
                        let value = snap.get("a").unwrap().default_value.clone();
                        assert!(matches!(value, FlagValue::Boolean(_)));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
    }
}
