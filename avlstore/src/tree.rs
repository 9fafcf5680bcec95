//! Height-balanced (AVL) binary search tree keyed by [`Identifier`].
//!
//! This module contains [`AvlTree`], the engine underneath [`crate::store::ScoreStore`] and
//! [`crate::set::StringSet`].

use std::cmp::Ordering;

use crate::error::InvariantError;
use crate::keys::identifier::Identifier;
use crate::node::{Link, Node, height};
use crate::record::Record;
use crate::stats::{TreeStats, TreeStatsTrait, update_tree_stats};
use crate::walk::{Order, drain_in_order, walk};

/// An AVL tree mapping identifiers to values.
///
/// Every node keeps `|height(left) - height(right)| <= 1`, so search, insertion and deletion
/// all touch O(log n) nodes and recursion depth stays logarithmic whatever the insertion
/// order.
///
/// Keys are unique. Inserting an identifier that is already present is rejected and leaves
/// the stored record untouched; there is no update-in-place.
///
/// ## Examples
///
/// ```rust
/// use avlstore::{AvlTree, Record};
///
/// let mut tree = AvlTree::new();
/// assert!(tree.insert(Record::new("carol", 80)));
/// assert!(tree.insert(Record::new("alice", 90)));
/// assert!(!tree.insert(Record::new("alice", 10)));
///
/// assert_eq!(tree.get("alice"), Some(&90));
/// assert_eq!(tree.len(), 2);
///
/// let removed = tree.delete("carol").unwrap();
/// assert_eq!(*removed.value(), 80);
/// assert!(tree.search("carol").is_none());
/// ```
#[derive(Debug)]
pub struct AvlTree<V> {
    root: Link<V>,
    len: usize,
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for AvlTree<V> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<V> AvlTree<V> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root node; 0 when empty, 1 for a single node.
    #[inline]
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Look a record up by key (generic version).
    #[inline]
    pub fn search<K>(&self, key: K) -> Option<&Record<V>>
    where
        K: Into<Identifier>,
    {
        self.search_k(&key.into())
    }

    /// Look a record up by key reference (direct version).
    pub fn search_k(&self, key: &Identifier) -> Option<&Record<V>> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            cur = match key.cmp(node.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.record),
            };
        }
        None
    }

    #[inline]
    pub fn get<K>(&self, key: K) -> Option<&V>
    where
        K: Into<Identifier>,
    {
        self.search(key).map(Record::value)
    }

    #[inline]
    pub fn contains<K>(&self, key: K) -> bool
    where
        K: Into<Identifier>,
    {
        self.search(key).is_some()
    }

    /// Insert a record.
    ///
    /// # Returns
    ///
    /// - `true` if the tree grew by one node
    /// - `false` if the identifier was already present; the incoming record is dropped and the
    ///   existing one kept
    pub fn insert(&mut self, record: Record<V>) -> bool {
        let mut inserted = false;
        self.root = Some(Self::insert_recurse(
            self.root.take(),
            record,
            &mut inserted,
        ));
        if inserted {
            self.len += 1;
            self.check_invariants();
        }
        inserted
    }

    /// Remove a record by key (generic version). Returns the removed record if the key existed.
    #[inline]
    pub fn delete<K>(&mut self, key: K) -> Option<Record<V>>
    where
        K: Into<Identifier>,
    {
        self.delete_k(&key.into())
    }

    /// Remove a record by key reference (direct version).
    pub fn delete_k(&mut self, key: &Identifier) -> Option<Record<V>> {
        self.root.as_ref()?;

        let mut removed = None;
        self.root = Self::delete_recurse(self.root.take(), key, &mut removed);
        if removed.is_some() {
            self.len -= 1;
            self.check_invariants();
        }
        removed
    }

    /// Release every node and leave the tree empty. Returns how many nodes were released.
    ///
    /// Children are detached before their parent is freed, using an explicit stack rather than
    /// recursion. Calling this on an empty tree does nothing.
    pub fn teardown(&mut self) -> usize {
        let mut released = 0;
        let mut stack: Vec<Box<Node<V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
            released += 1;
        }
        self.len = 0;
        if released > 0 {
            log::debug!("tree teardown released {released} nodes");
        }
        released
    }

    /// Visit every record in the given order.
    pub fn walk<F>(&self, order: Order, mut f: F)
    where
        F: FnMut(&Record<V>),
    {
        walk(&self.root, order, &mut f);
    }

    /// All records, in ascending identifier order.
    pub fn records(&self) -> Vec<&Record<V>> {
        let mut out = Vec::with_capacity(self.len);
        in_order_refs(&self.root, &mut out);
        out
    }

    /// Move every record of `other` into this tree, in ascending key order.
    ///
    /// Keys already present here keep their current record; the colliding record from `other`
    /// is dropped. Returns the number of records added.
    pub fn absorb(&mut self, mut other: AvlTree<V>) -> usize {
        let mut added = 0;
        other.len = 0;
        drain_in_order(other.root.take(), &mut |record| {
            if self.insert(record) {
                added += 1;
            }
        });
        added
    }

    /// Insert a copy of every record of `other`, which is left untouched.
    ///
    /// Same collision rule as [`AvlTree::absorb`]. Returns the number of records added.
    pub fn merge_from(&mut self, other: &AvlTree<V>) -> usize
    where
        V: Clone,
    {
        let mut added = 0;
        other.walk(Order::InOrder, |record| {
            if self.insert(record.clone()) {
                added += 1;
            }
        });
        added
    }

    /// Check every structural invariant: strict key order, stored heights, AVL balance and
    /// the entry count. Returns the tree height on success.
    pub fn validate(&self) -> Result<usize, InvariantError> {
        let mut counted = 0;
        let h = Self::validate_recurse(&self.root, None, None, &mut counted)?;
        if counted != self.len {
            return Err(InvariantError::LenMismatch {
                expected: self.len,
                counted,
            });
        }
        Ok(h)
    }

    #[cfg(feature = "invariant_checks")]
    fn check_invariants(&self) {
        if let Err(e) = self.validate() {
            panic!("tree invariant violated: {e}");
        }
    }

    #[cfg(not(feature = "invariant_checks"))]
    #[inline(always)]
    fn check_invariants(&self) {}
}

impl<V> Extend<Record<V>> for AvlTree<V> {
    fn extend<I: IntoIterator<Item = Record<V>>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl<V> FromIterator<Record<V>> for AvlTree<V> {
    fn from_iter<I: IntoIterator<Item = Record<V>>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<V> TreeStatsTrait for AvlTree<V> {
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            height: self.height(),
            ..Default::default()
        };
        if let Some(root) = &self.root {
            Self::get_tree_stats_recurse(root, &mut stats, 1);
        }
        stats
    }
}

fn in_order_refs<'a, V>(link: &'a Link<V>, out: &mut Vec<&'a Record<V>>) {
    if let Some(node) = link {
        in_order_refs(&node.left, out);
        out.push(&node.record);
        in_order_refs(&node.right, out);
    }
}

// Internals implementation
impl<V> AvlTree<V> {
    fn insert_recurse(link: Link<V>, record: Record<V>, inserted: &mut bool) -> Box<Node<V>> {
        let Some(mut node) = link else {
            *inserted = true;
            return Node::new_leaf(record);
        };

        let key = *record.id();
        match key.cmp(node.key()) {
            Ordering::Less => {
                node.left = Some(Self::insert_recurse(node.left.take(), record, inserted));
            }
            Ordering::Greater => {
                node.right = Some(Self::insert_recurse(node.right.take(), record, inserted));
            }
            Ordering::Equal => return node,
        }

        if !*inserted {
            return node;
        }
        node.rebalance_after_insert(&key)
    }

    fn delete_recurse(
        link: Link<V>,
        key: &Identifier,
        removed: &mut Option<Record<V>>,
    ) -> Link<V> {
        let mut node = link?;

        match key.cmp(node.key()) {
            Ordering::Less => node.left = Self::delete_recurse(node.left.take(), key, removed),
            Ordering::Greater => node.right = Self::delete_recurse(node.right.take(), key, removed),
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => {
                    *removed = Some(node.record);
                    return None;
                }
                // A lone child is already balanced and keeps its height.
                (Some(child), None) | (None, Some(child)) => {
                    *removed = Some(node.record);
                    return Some(child);
                }
                (Some(left), Some(right)) => {
                    let (rest, successor) = right.take_min();
                    node.left = Some(left);
                    node.right = rest;
                    *removed = Some(std::mem::replace(&mut node.record, successor));
                }
            },
        }

        if removed.is_none() {
            return Some(node);
        }
        Some(node.rebalance_after_delete())
    }

    fn validate_recurse(
        link: &Link<V>,
        lower: Option<&Identifier>,
        upper: Option<&Identifier>,
        counted: &mut usize,
    ) -> Result<usize, InvariantError> {
        let Some(node) = link else {
            return Ok(0);
        };
        let key = node.key();
        if lower.is_some_and(|l| key <= l) || upper.is_some_and(|u| key >= u) {
            return Err(InvariantError::OutOfOrder {
                key: *key,
                lower: lower.copied(),
                upper: upper.copied(),
            });
        }
        *counted += 1;

        let lh = Self::validate_recurse(&node.left, lower, Some(key), counted)?;
        let rh = Self::validate_recurse(&node.right, Some(key), upper, counted)?;

        let computed = 1 + lh.max(rh);
        if node.height != computed {
            return Err(InvariantError::HeightMismatch {
                key: *key,
                stored: node.height,
                computed,
            });
        }
        let balance = lh as isize - rh as isize;
        if balance.abs() > 1 {
            return Err(InvariantError::Unbalanced { key: *key, balance });
        }
        Ok(computed)
    }

    fn get_tree_stats_recurse(node: &Node<V>, stats: &mut TreeStats, depth: usize) {
        update_tree_stats(stats, node, depth);
        for child in [&node.left, &node.right].into_iter().flatten() {
            Self::get_tree_stats_recurse(child, stats, depth + 1);
        }
    }
}
