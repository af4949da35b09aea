//! Traversal positions and iterators over an [`RbTree`].
//!
//! A [`Cursor`] is a tree reference plus the current node; `None` is the
//! position one past the maximum. That end position sits between the maximum
//! and the minimum: stepping backward from it lands on the maximum, stepping
//! backward from the minimum lands on it.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::arena::Arena;
use crate::tree::RbTree;
use crate::types::RbNode;
use crate::util::{next, prev};

pub struct Cursor<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    tree: &'a RbTree<K, V, C>,
    node: Option<u32>,
}

impl<'a, K, V, C> Cursor<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn new(tree: &'a RbTree<K, V, C>, node: Option<u32>) -> Self {
        Self { tree, node }
    }

    /// Handle of the current node; `None` at the end position.
    pub fn index(&self) -> Option<u32> {
        self.node
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub fn key(&self) -> Option<&'a K> {
        self.node.map(|i| self.tree.key(i))
    }

    pub fn value(&self) -> Option<&'a V> {
        self.node.map(|i| self.tree.value(i))
    }

    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.node.map(|i| self.tree.entry(i))
    }

    /// Steps to the successor. Stays put at the end position.
    pub fn move_next(&mut self) {
        if let Some(i) = self.node {
            self.node = self.tree.next(i);
        }
    }

    /// Steps to the predecessor. From the end position, lands on the maximum.
    pub fn move_prev(&mut self) {
        self.node = match self.node {
            Some(i) => self.tree.prev(i),
            None => self.tree.last(),
        };
    }

    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        let mut c = *self;
        c.move_next();
        c.entry()
    }

    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        let mut c = *self;
        c.move_prev();
        c.entry()
    }
}

impl<K, V, C> Clone for Cursor<'_, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C> Copy for Cursor<'_, K, V, C> where C: Fn(&K, &K) -> Ordering {}

impl<K, V, C> PartialEq for Cursor<'_, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<K, V, C> Eq for Cursor<'_, K, V, C> where C: Fn(&K, &K) -> Ordering {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Cursor<'_, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.entry()).finish()
    }
}

// ── Iterators ─────────────────────────────────────────────────────────────

/// Entries between two nodes, both inclusive, in key order.
pub struct Range<'a, K, V> {
    arena: &'a Arena<RbNode<K, V>>,
    front: Option<u32>,
    back: Option<u32>,
}

impl<'a, K, V> Range<'a, K, V> {
    /// `front` and `back` must both be `None` or both name nodes with
    /// `front` not after `back`.
    pub(crate) fn new(arena: &'a Arena<RbNode<K, V>>, front: Option<u32>, back: Option<u32>) -> Self {
        Self { arena, front, back }
    }

    fn entry(&self, i: u32) -> (&'a K, &'a V) {
        let n = &self.arena[i];
        (&n.k, &n.v)
    }
}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let f = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = next(self.arena, f);
        }
        Some(self.entry(f))
    }
}

impl<K, V> DoubleEndedIterator for Range<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let b = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = prev(self.arena, b);
        }
        Some(self.entry(b))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

/// All entries in key order.
pub struct Iter<'a, K, V> {
    range: Range<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(
        arena: &'a Arena<RbNode<K, V>>,
        front: Option<u32>,
        back: Option<u32>,
        len: usize,
    ) -> Self {
        Self {
            range: Range::new(arena, front, back),
            remaining: len,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            range: self.range.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.range.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.range.next_back()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
