//! Tree facade: node store, navigator and balancer behind one type.

use std::cmp::Ordering;
use std::ops::{Bound, RangeBounds};

use log::debug;

use crate::arena::Arena;
use crate::cursor::{Cursor, Iter, Range};
use crate::error::{InvariantViolation, TreeError};
use crate::red_black;
use crate::types::{default_comparator, RbNode};
use crate::util;

/// Red-black tree of unique keys, each carrying a value.
///
/// Nodes live in an arena and are addressed by `u32` handles. A handle stays
/// valid until its own node is erased; erasing other nodes never moves it.
/// The comparator is fixed at construction.
#[derive(Clone)]
pub struct RbTree<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    root: Option<u32>,
    arena: Arena<RbNode<K, V>>,
    /// Linked nodes only; the arena also holds nodes awaiting `insert`.
    size: usize,
    comparator: C,
}

impl<K, V> RbTree<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for RbTree<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            arena: Arena::new(),
            size: 0,
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Number of nodes linked into the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn arena(&self) -> &Arena<RbNode<K, V>> {
        &self.arena
    }

    // ── Node store ────────────────────────────────────────────────────────

    /// Allocates a detached red node. It joins the tree only via [`insert`].
    ///
    /// [`insert`]: RbTree::insert
    pub fn create(&mut self, key: K, value: V) -> Result<u32, TreeError> {
        self.arena.alloc(RbNode::new(key, value))
    }

    /// Frees a node that is not linked into the tree.
    pub fn destroy(&mut self, node: u32) -> (K, V) {
        debug_assert!(
            self.root != Some(node) && self.arena[node].p.is_none(),
            "destroying a linked node"
        );
        self.arena.free(node).into_entry()
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Links a node from [`create`] into the tree.
    ///
    /// Returns `false` and frees `node` if an equal key is already present.
    ///
    /// [`create`]: RbTree::create
    pub fn insert(&mut self, node: u32) -> bool {
        self.insert_at(node).1
    }

    /// Like [`insert`], but also returns the handle holding the key: `node`
    /// itself, or the existing node that rejected it.
    ///
    /// [`insert`]: RbTree::insert
    pub fn insert_at(&mut self, node: u32) -> (u32, bool) {
        match red_black::insert(&mut self.arena, &mut self.root, node, &self.comparator) {
            Ok(()) => {
                self.size += 1;
                (node, true)
            }
            Err(existing) => (existing, false),
        }
    }

    /// `create` followed by `insert`.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<bool, TreeError> {
        Ok(self.try_insert_at(key, value)?.1)
    }

    /// `create` followed by `insert_at`.
    pub fn try_insert_at(&mut self, key: K, value: V) -> Result<(u32, bool), TreeError> {
        let node = self.create(key, value)?;
        Ok(self.insert_at(node))
    }

    /// Removes the node matching `key`. Returns whether one was removed.
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Removes the node matching `key` and returns its entry.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.find(key)?;
        Some(self.remove_node(node))
    }

    /// Removes the node behind a linked handle.
    pub fn remove_node(&mut self, node: u32) -> (K, V) {
        let entry = red_black::remove(&mut self.arena, &mut self.root, node).into_entry();
        self.size -= 1;
        entry
    }

    /// Removes every node from `first` up to, not including, `last`.
    /// `None` stands for the end position on either side. Returns the count.
    pub fn remove_span(&mut self, first: Option<u32>, last: Option<u32>) -> usize {
        let mut curr = first;
        let mut removed = 0;
        while let Some(node) = curr {
            if curr == last {
                break;
            }
            // Erasing transplants nodes, so the successor handle survives.
            curr = self.next(node);
            self.remove_node(node);
            removed += 1;
        }
        removed
    }

    /// Removes every node whose key falls in `range`. Returns the count.
    pub fn remove_range<R: RangeBounds<K>>(&mut self, range: R) -> usize {
        let Some((front, back)) = self.range_nodes(&range) else {
            return 0;
        };
        let stop = self.next(back);
        let removed = self.remove_span(Some(front), stop);
        debug!("removed {removed} nodes by range");
        removed
    }

    /// Frees every node, linked or not.
    pub fn clear(&mut self) {
        self.arena.clear_subtree(&mut self.root);
        self.arena.clear();
        self.size = 0;
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    pub fn find(&self, key: &K) -> Option<u32> {
        util::find(&self.arena, self.root, key, &self.comparator)
    }

    pub fn lower_bound(&self, key: &K) -> Option<u32> {
        util::lower_bound(&self.arena, self.root, key, &self.comparator)
    }

    pub fn upper_bound(&self, key: &K) -> Option<u32> {
        util::upper_bound(&self.arena, self.root, key, &self.comparator)
    }

    pub fn reverse_lower_bound(&self, key: &K) -> Option<u32> {
        util::reverse_lower_bound(&self.arena, self.root, key, &self.comparator)
    }

    pub fn reverse_upper_bound(&self, key: &K) -> Option<u32> {
        util::reverse_upper_bound(&self.arena, self.root, key, &self.comparator)
    }

    pub fn first(&self) -> Option<u32> {
        util::first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        util::last(&self.arena, self.root)
    }

    pub fn next(&self, node: u32) -> Option<u32> {
        util::next(&self.arena, node)
    }

    pub fn prev(&self, node: u32) -> Option<u32> {
        util::prev(&self.arena, node)
    }

    pub fn key(&self, node: u32) -> &K {
        &self.arena[node].k
    }

    pub fn value(&self, node: u32) -> &V {
        &self.arena[node].v
    }

    pub fn value_mut(&mut self, node: u32) -> &mut V {
        &mut self.arena[node].v
    }

    pub fn entry(&self, node: u32) -> (&K, &V) {
        let n = &self.arena[node];
        (&n.k, &n.v)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| self.value(i))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.find(key)?;
        Some(self.value_mut(node))
    }

    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(u32, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((i, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let n = &self.arena[i];
            stack.extend(n.l.map(|l| (l, depth + 1)));
            stack.extend(n.r.map(|r| (r, depth + 1)));
        }
        deepest
    }

    /// Runs the invariant checker; returns the black height.
    pub fn check(&self) -> Result<usize, InvariantViolation> {
        red_black::check(&self.arena, self.root, self.size, &self.comparator)
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    pub fn cursor(&self, node: Option<u32>) -> Cursor<'_, K, V, C> {
        Cursor::new(self, node)
    }

    /// Cursor at the minimum, or at the end position when empty.
    pub fn begin(&self) -> Cursor<'_, K, V, C> {
        self.cursor(self.first())
    }

    /// Cursor one past the maximum.
    pub fn end(&self) -> Cursor<'_, K, V, C> {
        self.cursor(None)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, self.first(), self.last(), self.len())
    }

    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Range<'_, K, V> {
        match self.range_nodes(&range) {
            Some((front, back)) => Range::new(&self.arena, Some(front), Some(back)),
            None => Range::new(&self.arena, None, None),
        }
    }

    /// First and last node inside `range`, or `None` if it selects nothing.
    fn range_nodes<R: RangeBounds<K>>(&self, range: &R) -> Option<(u32, u32)> {
        let front = match range.start_bound() {
            Bound::Included(k) => self.lower_bound(k),
            Bound::Excluded(k) => self.upper_bound(k),
            Bound::Unbounded => self.first(),
        }?;
        let back = match range.end_bound() {
            Bound::Included(k) => self.reverse_lower_bound(k),
            Bound::Excluded(k) => self.reverse_upper_bound(k),
            Bound::Unbounded => self.last(),
        }?;
        if (self.comparator)(self.key(front), self.key(back)) == Ordering::Greater {
            return None;
        }
        Some((front, back))
    }
}
