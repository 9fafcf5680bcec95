use std::cmp::Ordering;

use crate::keys::identifier::Identifier;
use crate::record::Record;

pub(crate) type Link<V> = Option<Box<Node<V>>>;

/// A tree node. Owns its record and, exclusively, its children; there are no parent pointers.
#[derive(Debug)]
pub(crate) struct Node<V> {
    pub(crate) record: Record<V>,
    pub(crate) height: usize,
    pub(crate) left: Link<V>,
    pub(crate) right: Link<V>,
}

#[inline]
pub(crate) fn height<V>(link: &Link<V>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

impl<V> Node<V> {
    pub(crate) fn new_leaf(record: Record<V>) -> Box<Self> {
        Box::new(Self {
            record,
            height: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    pub(crate) fn key(&self) -> &Identifier {
        self.record.id()
    }

    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// height(left) - height(right).
    #[inline]
    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Left child becomes the subtree root. Without a left child this is the identity.
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = self.left.take() else {
            return self;
        };
        log::trace!("rotate right at {}", self.key());
        self.left = pivot.right.take();
        self.update_height();
        pivot.right = Some(self);
        pivot.update_height();
        pivot
    }

    /// Right child becomes the subtree root. Without a right child this is the identity.
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = self.right.take() else {
            return self;
        };
        log::trace!("rotate left at {}", self.key());
        self.right = pivot.left.take();
        self.update_height();
        pivot.left = Some(self);
        pivot.update_height();
        pivot
    }

    fn rotate_left_right(mut self: Box<Self>) -> Box<Self> {
        self.left = self.left.take().map(Node::rotate_left);
        self.rotate_right()
    }

    fn rotate_right_left(mut self: Box<Self>) -> Box<Self> {
        self.right = self.right.take().map(Node::rotate_right);
        self.rotate_left()
    }

    /// Restores balance on the way back up from inserting `inserted`.
    ///
    /// The case is picked by where the new key went relative to the heavy child: an outer
    /// insertion needs one rotation, an inner one needs two.
    pub(crate) fn rebalance_after_insert(mut self: Box<Self>, inserted: &Identifier) -> Box<Self> {
        self.update_height();
        let balance = self.balance_factor();

        if balance > 1 {
            let towards = self.left.as_ref().map(|l| inserted.cmp(l.key()));
            return match towards {
                Some(Ordering::Less) => self.rotate_right(),
                Some(Ordering::Greater) => self.rotate_left_right(),
                _ => self,
            };
        }
        if balance < -1 {
            let towards = self.right.as_ref().map(|r| inserted.cmp(r.key()));
            return match towards {
                Some(Ordering::Greater) => self.rotate_left(),
                Some(Ordering::Less) => self.rotate_right_left(),
                _ => self,
            };
        }
        self
    }

    /// Restores balance on the way back up from a deletion.
    ///
    /// A balanced heavy-side child takes the single rotation; removal can leave one there,
    /// insertion cannot.
    pub(crate) fn rebalance_after_delete(mut self: Box<Self>) -> Box<Self> {
        self.update_height();
        let balance = self.balance_factor();

        if balance > 1 {
            let child = self.left.as_ref().map_or(0, |l| l.balance_factor());
            return if child >= 0 {
                self.rotate_right()
            } else {
                self.rotate_left_right()
            };
        }
        if balance < -1 {
            let child = self.right.as_ref().map_or(0, |r| r.balance_factor());
            return if child <= 0 {
                self.rotate_left()
            } else {
                self.rotate_right_left()
            };
        }
        self
    }

    /// Detaches the minimum of this subtree. Returns the remaining (rebalanced) subtree and
    /// the detached record.
    pub(crate) fn take_min(mut self: Box<Self>) -> (Link<V>, Record<V>) {
        match self.left.take() {
            None => {
                let Node { record, right, .. } = *self;
                (right, record)
            }
            Some(left) => {
                let (rest, min) = left.take_min();
                self.left = rest;
                (Some(self.rebalance_after_delete()), min)
            }
        }
    }
}
