use crate::keys::identifier::Identifier;
use crate::record::Record;
use crate::stats::{TreeStats, TreeStatsTrait};
use crate::tree::AvlTree;

/// Payload stored alongside every set member. Never read.
pub const SET_SENTINEL: f32 = 0.0;

/// A set of bounded-length strings on top of [`AvlTree`].
///
/// ```rust
/// use avlstore::StringSet;
///
/// let mut set = StringSet::new();
/// set.add("x");
/// set.add("x");
/// set.add("y");
/// assert_eq!(set.size(), 2);
/// assert!(set.contains("x"));
/// assert!(!set.contains("z"));
/// ```
#[derive(Debug, Default)]
pub struct StringSet {
    tree: AvlTree<f32>,
    count: usize,
}

impl StringSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains<K>(&self, element: K) -> bool
    where
        K: Into<Identifier>,
    {
        self.tree.contains(element)
    }

    /// Returns `true` if `element` was not already a member.
    pub fn add<K>(&mut self, element: K) -> bool
    where
        K: Into<Identifier>,
    {
        let element = element.into();
        if self.contains(element) {
            return false;
        }
        self.tree.insert(Record::new(element, SET_SENTINEL));
        self.count += 1;
        true
    }

    /// Returns `true` if `element` was a member.
    pub fn remove<K>(&mut self, element: K) -> bool
    where
        K: Into<Identifier>,
    {
        let element = element.into();
        if !self.contains(element) {
            return false;
        }
        self.tree.delete_k(&element);
        self.count -= 1;
        true
    }

    pub fn clean(&mut self) {
        self.tree.teardown();
        self.count = 0;
    }

    /// Members in ascending order.
    pub fn elements(&self) -> Vec<Identifier> {
        self.tree.records().into_iter().map(|r| *r.id()).collect()
    }
}

impl<K: Into<Identifier>> Extend<K> for StringSet {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<K: Into<Identifier>> FromIterator<K> for StringSet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = StringSet::new();
        set.extend(iter);
        set
    }
}

impl TreeStatsTrait for StringSet {
    fn get_tree_stats(&self) -> TreeStats {
        self.tree.get_tree_stats()
    }
}
