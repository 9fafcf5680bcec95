//! A balanced tree of scores that keeps count, mean and population standard deviation current.

use num_traits::Float;

use crate::keys::identifier::Identifier;
use crate::record::{Grade, Record};
use crate::stats::{TreeStats, TreeStatsTrait};
use crate::summary::{Moments, Summary};
use crate::tree::AvlTree;
use crate::walk::Order;

/// Scores keyed by identifier, with running statistics over every stored score.
///
/// Adding a score updates the statistics in O(1). Removing one rescans the remaining scores,
/// O(n), since the running moments cannot be unwound exactly.
///
/// ```rust
/// use avlstore::{Record, ScoreStore};
///
/// let mut store = ScoreStore::new();
/// store.add(Record::new("alice", 90.0));
/// store.add(Record::new("bob", 70.0));
/// store.add(Record::new("carol", 80.0));
/// assert_eq!(store.count(), 3);
/// assert_eq!(store.mean(), 80.0);
///
/// store.remove("bob");
/// assert_eq!(store.mean(), 85.0);
/// assert_eq!(store.stddev(), 5.0);
/// ```
#[derive(Debug)]
pub struct ScoreStore<F = f64> {
    tree: AvlTree<F>,
    summary: Summary<F>,
}

impl<F: Float> Default for ScoreStore<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> ScoreStore<F> {
    pub fn new() -> Self {
        Self {
            tree: AvlTree::new(),
            summary: Summary::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.summary.count()
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }

    pub fn mean(&self) -> F {
        self.summary.mean()
    }

    pub fn stddev(&self) -> F {
        self.summary.stddev()
    }

    pub fn summary(&self) -> &Summary<F> {
        &self.summary
    }

    /// The underlying tree, read-only.
    pub fn tree(&self) -> &AvlTree<F> {
        &self.tree
    }

    pub fn get<K>(&self, key: K) -> Option<F>
    where
        K: Into<Identifier>,
    {
        self.tree.get(key).copied()
    }

    pub fn contains<K>(&self, key: K) -> bool
    where
        K: Into<Identifier>,
    {
        self.tree.contains(key)
    }

    /// Letter grade of the stored score for `key`.
    pub fn grade<K>(&self, key: K) -> Option<Grade>
    where
        K: Into<Identifier>,
    {
        let score = self.get(key)?.to_f64()?;
        Some(Grade::from_score(score))
    }

    /// Add a record. Returns `false`, changing nothing, if the identifier is already stored or
    /// the score is not finite.
    pub fn add(&mut self, record: Record<F>) -> bool {
        let x = *record.value();
        if !x.is_finite() {
            log::warn!("rejecting non-finite score for {}", record.id());
            return false;
        }
        if !self.tree.insert(record) {
            return false;
        }
        self.summary.push(x);
        true
    }

    /// Remove the record for `key`, returning it if it was present.
    pub fn remove<K>(&mut self, key: K) -> Option<Record<F>>
    where
        K: Into<Identifier>,
    {
        let removed = self.tree.delete(key)?;
        self.recompute();
        Some(removed)
    }

    /// Move every record of `source` into this store, leaving `source` empty.
    ///
    /// When a key exists in both, this store's score wins and `source`'s is discarded. If this
    /// store is empty the source tree and statistics are taken over wholesale; otherwise the
    /// records are inserted one by one and the statistics recomputed over the union.
    pub fn merge(&mut self, source: &mut ScoreStore<F>) {
        if source.is_empty() {
            return;
        }

        if self.is_empty() {
            log::debug!("merge: taking over {} records", source.count());
            self.tree = std::mem::take(&mut source.tree);
            self.summary = source.summary;
        } else {
            let incoming = std::mem::take(&mut source.tree);
            let offered = incoming.len();
            let added = self.tree.absorb(incoming);
            log::debug!(
                "merge: inserted {added} of {offered} records, {} collisions",
                offered - added
            );
            self.recompute();
        }

        source.clean();
    }

    /// Drop every record and zero the statistics.
    pub fn clean(&mut self) {
        self.tree.teardown();
        self.summary.reset();
    }

    /// Rebuild the statistics by a full pass over the tree.
    fn recompute(&mut self) {
        let mut moments = Moments::new();
        self.tree
            .walk(Order::InOrder, |record| moments.accumulate(*record.value()));
        log::debug!("recomputed statistics over {} records", moments.count());
        self.summary = moments.finish();
    }
}

impl<F: Float> TreeStatsTrait for ScoreStore<F> {
    fn get_tree_stats(&self) -> TreeStats {
        self.tree.get_tree_stats()
    }
}

impl<F: Float> Extend<Record<F>> for ScoreStore<F> {
    fn extend<I: IntoIterator<Item = Record<F>>>(&mut self, iter: I) {
        for record in iter {
            self.add(record);
        }
    }
}

impl<F: Float> FromIterator<Record<F>> for ScoreStore<F> {
    fn from_iter<I: IntoIterator<Item = Record<F>>>(iter: I) -> Self {
        let mut store = ScoreStore::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn store_of(entries: &[(&str, f64)]) -> ScoreStore {
        entries.iter().map(|(k, v)| Record::new(*k, *v)).collect()
    }

    #[test]
    fn test_empty_store() {
        let mut store = ScoreStore::<f64>::new();
        assert_eq!(store.count(), 0);
        assert_eq!(store.mean(), 0.0);
        assert_eq!(store.stddev(), 0.0);
        assert!(store.remove("ghost").is_none());
        store.clean();
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_three() {
        let store = store_of(&[("alice", 90.0), ("bob", 70.0), ("carol", 80.0)]);
        assert_eq!(store.count(), 3);
        assert!((store.mean() - 80.0).abs() < EPS);
        assert!((store.stddev() - (200.0f64 / 3.0).sqrt()).abs() < EPS);
    }

    #[test]
    fn test_remove_recomputes() {
        let mut store = store_of(&[("alice", 90.0), ("bob", 70.0), ("carol", 80.0)]);
        let removed = store.remove("bob").unwrap();
        assert_eq!(*removed.value(), 70.0);
        assert_eq!(store.count(), 2);
        assert!((store.mean() - 85.0).abs() < EPS);
        assert!((store.stddev() - 5.0).abs() < EPS);

        store.remove("alice");
        store.remove("carol");
        assert_eq!(store.count(), 0);
        assert_eq!(store.mean(), 0.0);
        assert_eq!(store.stddev(), 0.0);
    }

    #[test]
    fn test_remove_missing_keeps_stats() {
        let mut store = store_of(&[("alice", 90.0), ("bob", 70.0)]);
        let before = *store.summary();
        assert!(store.remove("zed").is_none());
        assert_eq!(*store.summary(), before);
    }

    #[test]
    fn test_duplicate_add_keeps_original() {
        let mut store = store_of(&[("alice", 90.0)]);
        assert!(!store.add(Record::new("alice", 50.0)));
        assert_eq!(store.count(), 1);
        assert_eq!(store.mean(), 90.0);
        assert_eq!(store.get("alice"), Some(90.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut store = store_of(&[("alice", 90.0)]);
        assert!(!store.add(Record::new("nan", f64::NAN)));
        assert!(!store.add(Record::new("inf", f64::INFINITY)));
        assert_eq!(store.count(), 1);
        assert!(!store.contains("nan"));
        assert_eq!(store.mean(), 90.0);
    }

    #[test]
    fn test_merge_into_nonempty() {
        let mut a = store_of(&[("alice", 90.0)]);
        let mut b = store_of(&[("bob", 70.0), ("carol", 80.0)]);
        a.merge(&mut b);
        assert_eq!(a.count(), 3);
        assert!((a.mean() - 80.0).abs() < EPS);
        assert!((a.stddev() - 8.164_965_809_277_26).abs() < 1e-9);
        assert_eq!(b.count(), 0);
        assert!(b.tree().is_empty());
        assert_eq!(b.mean(), 0.0);
        assert_eq!(b.stddev(), 0.0);
    }

    #[test]
    fn test_merge_into_empty_takes_over() {
        let mut a = ScoreStore::new();
        let mut b = store_of(&[("bob", 70.0), ("carol", 80.0)]);
        let expected = *b.summary();
        a.merge(&mut b);
        assert_eq!(*a.summary(), expected);
        assert_eq!(a.tree().len(), 2);
        assert!(b.is_empty());
        assert!(b.tree().is_empty());
    }

    #[test]
    fn test_merge_empty_source_is_noop() {
        let mut a = store_of(&[("alice", 90.0)]);
        let mut b = ScoreStore::new();
        a.merge(&mut b);
        assert_eq!(a.count(), 1);
        assert_eq!(a.mean(), 90.0);
    }

    #[test]
    fn test_merge_collision_keeps_destination() {
        let mut a = store_of(&[("alice", 90.0), ("bob", 60.0)]);
        let mut b = store_of(&[("bob", 100.0), ("dave", 30.0)]);
        a.merge(&mut b);
        assert_eq!(a.count(), 3);
        assert_eq!(a.get("bob"), Some(60.0));
        assert!((a.mean() - 60.0).abs() < EPS);
        assert!(b.is_empty());
    }

    #[test]
    fn test_grade_lookup() {
        let store = store_of(&[("alice", 91.0), ("bob", 52.0)]);
        assert_eq!(store.grade("alice"), Some(Grade::APlus));
        assert_eq!(store.grade("bob"), Some(Grade::DMinus));
        assert_eq!(store.grade("carol"), None);
    }

    #[test]
    fn test_single_precision() {
        let mut store = ScoreStore::<f32>::new();
        store.add(Record::new("alice", 90.0));
        store.add(Record::new("bob", 70.0));
        store.add(Record::new("carol", 80.0));
        assert!((store.mean() - 80.0).abs() < 1e-4);
        assert!((store.stddev() - 8.164_966).abs() < 1e-3);
    }

    #[test]
    fn test_clean_then_reuse() {
        let mut store = store_of(&[("alice", 90.0), ("bob", 70.0)]);
        store.clean();
        assert!(store.is_empty());
        assert!(store.tree().is_empty());
        store.add(Record::new("carol", 10.0));
        assert_eq!(store.count(), 1);
        assert_eq!(store.mean(), 10.0);
    }
}
