//! Whole-tree visits in the four classic orders.

use std::collections::VecDeque;

use crate::node::{Link, Node};
use crate::record::Record;

/// Order in which [`crate::tree::AvlTree::walk`] presents records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    PreOrder,
    /// Ascending identifier order.
    InOrder,
    PostOrder,
    /// Level by level from the root, left to right within a level.
    BreadthFirst,
}

pub(crate) fn walk<V, F>(root: &Link<V>, order: Order, f: &mut F)
where
    F: FnMut(&Record<V>),
{
    match order {
        Order::PreOrder => pre_order(root, f),
        Order::InOrder => in_order(root, f),
        Order::PostOrder => post_order(root, f),
        Order::BreadthFirst => breadth_first(root, f),
    }
}

fn pre_order<V, F: FnMut(&Record<V>)>(link: &Link<V>, f: &mut F) {
    if let Some(node) = link {
        f(&node.record);
        pre_order(&node.left, f);
        pre_order(&node.right, f);
    }
}

fn in_order<V, F: FnMut(&Record<V>)>(link: &Link<V>, f: &mut F) {
    if let Some(node) = link {
        in_order(&node.left, f);
        f(&node.record);
        in_order(&node.right, f);
    }
}

fn post_order<V, F: FnMut(&Record<V>)>(link: &Link<V>, f: &mut F) {
    if let Some(node) = link {
        post_order(&node.left, f);
        post_order(&node.right, f);
        f(&node.record);
    }
}

fn breadth_first<V, F: FnMut(&Record<V>)>(link: &Link<V>, f: &mut F) {
    let mut queue: VecDeque<&Node<V>> = link.as_deref().into_iter().collect();
    while let Some(node) = queue.pop_front() {
        f(&node.record);
        queue.extend(node.left.as_deref());
        queue.extend(node.right.as_deref());
    }
}

/// Consumes a subtree, handing each record over in ascending order.
pub(crate) fn drain_in_order<V, F>(link: Link<V>, f: &mut F)
where
    F: FnMut(Record<V>),
{
    if let Some(node) = link {
        let Node {
            record,
            left,
            right,
            ..
        } = *node;
        drain_in_order(left, f);
        f(record);
        drain_in_order(right, f);
    }
}
