//! The decision store: identity to decision, last write wins.
//!
//! Storage sits behind an `Arc` and is copied on write whenever another
//! handle still shares it, so a caller holding an older clone can detect
//! change with [`DecisionStore::ptr_eq`] instead of comparing contents.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::decision::{MergeDecision, Side};
use crate::identity::SegmentIdentity;

/// Mapping from [`SegmentIdentity`] to the latest [`MergeDecision`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecisionStore {
    decisions: Arc<BTreeMap<SegmentIdentity, MergeDecision>>,
}

impl DecisionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an acceptance, overwriting any earlier decision.
    pub fn accept(&mut self, identity: SegmentIdentity, side: Side) {
        self.record(MergeDecision::accept(identity, side));
    }

    /// Record a rejection, overwriting any earlier decision.
    pub fn reject(&mut self, identity: SegmentIdentity) {
        self.record(MergeDecision::reject(identity));
    }

    /// Store a decision under its own identity.
    pub fn record(&mut self, decision: MergeDecision) {
        Arc::make_mut(&mut self.decisions).insert(decision.identity, decision);
    }

    pub fn get(&self, identity: &SegmentIdentity) -> Option<&MergeDecision> {
        self.decisions.get(identity)
    }

    /// Forget every decision.
    pub fn clear(&mut self) {
        self.decisions = Arc::new(BTreeMap::new());
    }

    /// A new store with the acceptance applied; `self` is untouched.
    #[must_use]
    pub fn with_accept(&self, identity: SegmentIdentity, side: Side) -> Self {
        let mut next = self.clone();
        next.accept(identity, side);
        next
    }

    /// A new store with the rejection applied; `self` is untouched.
    #[must_use]
    pub fn with_reject(&self, identity: SegmentIdentity) -> Self {
        let mut next = self.clone();
        next.reject(identity);
        next
    }

    /// `true` when both handles share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.decisions, &other.decisions)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Decisions in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &MergeDecision> {
        self.decisions.values()
    }
}

impl FromIterator<MergeDecision> for DecisionStore {
    fn from_iter<I: IntoIterator<Item = MergeDecision>>(iter: I) -> Self {
        let mut store = Self::new();
        for decision in iter {
            store.record(decision);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_diff::DiffType;

    fn id(line: usize, t: DiffType) -> SegmentIdentity {
        SegmentIdentity::new(line, t)
    }

    #[test]
    fn unknown_identity_is_absent() {
        let store = DecisionStore::new();
        assert!(store.get(&id(1, DiffType::Added)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn last_write_wins() {
        let mut store = DecisionStore::new();
        let key = id(2, DiffType::Modified);
        store.accept(key, Side::Right);
        store.reject(key);

        let decision = store.get(&key).unwrap();
        assert!(!decision.accepted);
        assert_eq!(decision.side, Side::Left);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn repeated_calls_are_idempotent() {
        let mut once = DecisionStore::new();
        once.accept(id(1, DiffType::Added), Side::Right);
        let mut twice = once.clone();
        twice.accept(id(1, DiffType::Added), Side::Right);
        assert_eq!(once, twice);
    }

    #[test]
    fn identities_differ_by_type() {
        let mut store = DecisionStore::new();
        store.accept(id(4, DiffType::Added), Side::Right);
        store.reject(id(4, DiffType::Removed));
        assert_eq!(store.len(), 2);
        assert!(store.get(&id(4, DiffType::Added)).unwrap().accepted);
        assert!(!store.get(&id(4, DiffType::Removed)).unwrap().accepted);
    }

    #[test]
    fn clear_empties_store() {
        let mut store = DecisionStore::new();
        store.accept(id(1, DiffType::Added), Side::Left);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn mutation_of_shared_store_copies() {
        let mut store = DecisionStore::new();
        store.accept(id(1, DiffType::Added), Side::Right);
        let snapshot = store.clone();
        assert!(store.ptr_eq(&snapshot));

        store.reject(id(1, DiffType::Added));
        assert!(!store.ptr_eq(&snapshot));
        assert!(snapshot.get(&id(1, DiffType::Added)).unwrap().accepted);
    }

    #[test]
    fn with_variants_leave_original_untouched() {
        let base = DecisionStore::new();
        let next = base.with_accept(id(3, DiffType::Modified), Side::Right);
        assert!(base.is_empty());
        assert_eq!(next.len(), 1);
        assert!(!base.ptr_eq(&next));

        let rejected = next.with_reject(id(3, DiffType::Modified));
        assert!(next.get(&id(3, DiffType::Modified)).unwrap().accepted);
        assert!(!rejected.get(&id(3, DiffType::Modified)).unwrap().accepted);
    }

    #[test]
    fn iter_is_in_identity_order() {
        let store: DecisionStore = [
            MergeDecision::accept(id(9, DiffType::Added), Side::Right),
            MergeDecision::reject(id(2, DiffType::Removed)),
        ]
        .into_iter()
        .collect();
        let lines: Vec<usize> = store.iter().map(|d| d.identity.line_number).collect();
        assert_eq!(lines, vec![2, 9]);
    }
}
