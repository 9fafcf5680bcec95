//! Shape statistics for balanced trees.
//!
//! Useful when checking how well the tree is balanced in practice, in benchmarks and in
//! tests. Gathering them walks the whole tree.

use crate::node::Node;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub num_nodes: usize,
    pub num_leaves: usize,
    /// Height of the root; 0 for an empty tree.
    pub height: usize,
    /// Deepest level reached by the walk, counted from 1 at the root.
    pub max_depth: usize,
    /// Largest |balance factor| seen. Never above 1 for a valid tree.
    pub max_abs_balance: usize,
}

impl TreeStats {
    /// Ratio of nodes present to the nodes a perfect tree of the same height would hold.
    pub fn fill_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        let capacity = (1u128 << self.height.min(127)) - 1;
        self.num_nodes as f64 / capacity as f64
    }
}

pub(crate) fn update_tree_stats<V>(stats: &mut TreeStats, node: &Node<V>, depth: usize) {
    stats.num_nodes += 1;
    if node.is_leaf() {
        stats.num_leaves += 1;
    }
    stats.max_depth = stats.max_depth.max(depth);
    stats.max_abs_balance = stats
        .max_abs_balance
        .max(node.balance_factor().unsigned_abs());
}
