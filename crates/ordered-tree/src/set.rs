//! Ordered set of unique keys.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::RangeBounds;

use crate::cursor::{self, Cursor};
use crate::error::{InvariantViolation, TreeError};
use crate::tree::RbTree;

/// Ordered set backed by a red-black tree with unit values.
#[derive(Clone)]
pub struct SortedSet<K, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    tree: RbTree<K, (), C>,
}

impl<K: Ord> SortedSet<K, fn(&K, &K) -> Ordering> {
    pub fn new() -> Self {
        Self { tree: RbTree::new() }
    }
}

impl<K: Ord> Default for SortedSet<K, fn(&K, &K) -> Ordering> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> SortedSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RbTree::with_comparator(comparator),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Adds `key` unless an equal key is present; returns whether it was added.
    ///
    /// # Panics
    ///
    /// If node storage cannot be obtained. Use [`try_insert`] to handle that.
    ///
    /// [`try_insert`]: SortedSet::try_insert
    pub fn insert(&mut self, key: K) -> bool {
        match self.try_insert(key) {
            Ok(inserted) => inserted,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_insert(&mut self, key: K) -> Result<bool, TreeError> {
        self.tree.try_insert(key, ())
    }

    /// Like [`insert`], but also returns a cursor at the stored key equal to
    /// `key`.
    ///
    /// # Panics
    ///
    /// If node storage cannot be obtained.
    ///
    /// [`insert`]: SortedSet::insert
    pub fn insert_at(&mut self, key: K) -> (Cursor<'_, K, (), C>, bool) {
        match self.try_insert_at(key) {
            Ok(pair) => pair,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_insert_at(
        &mut self,
        key: K,
    ) -> Result<(Cursor<'_, K, (), C>, bool), TreeError> {
        let (node, inserted) = self.tree.try_insert_at(key, ())?;
        Ok((self.tree.cursor(Some(node)), inserted))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// The stored key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.tree.find(key).map(|i| self.tree.key(i))
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.erase(key)
    }

    /// Removes and returns the stored key equal to `key`.
    pub fn take(&mut self, key: &K) -> Option<K> {
        self.tree.remove(key).map(|(k, ())| k)
    }

    /// Removes the key at a cursor position, given as [`Cursor::index`].
    /// Other positions stay valid.
    pub fn remove_at(&mut self, node: u32) -> K {
        self.tree.remove_node(node).0
    }

    /// Removes keys from position `first` up to, not including, `last`.
    pub fn remove_span(&mut self, first: Option<u32>, last: Option<u32>) -> usize {
        self.tree.remove_span(first, last)
    }

    pub fn remove_range<R: RangeBounds<K>>(&mut self, range: R) -> usize {
        self.tree.remove_range(range)
    }

    pub fn first(&self) -> Option<&K> {
        self.tree.first().map(|i| self.tree.key(i))
    }

    pub fn last(&self) -> Option<&K> {
        self.tree.last().map(|i| self.tree.key(i))
    }

    pub fn pop_first(&mut self) -> Option<K> {
        let node = self.tree.first()?;
        Some(self.tree.remove_node(node).0)
    }

    pub fn pop_last(&mut self) -> Option<K> {
        let node = self.tree.last()?;
        Some(self.tree.remove_node(node).0)
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn find(&self, key: &K) -> Cursor<'_, K, (), C> {
        self.tree.cursor(self.tree.find(key))
    }

    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K, (), C> {
        self.tree.cursor(self.tree.lower_bound(key))
    }

    pub fn upper_bound(&self, key: &K) -> Cursor<'_, K, (), C> {
        self.tree.cursor(self.tree.upper_bound(key))
    }

    pub fn equal_range(&self, key: &K) -> (Cursor<'_, K, (), C>, Cursor<'_, K, (), C>) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    pub fn begin(&self) -> Cursor<'_, K, (), C> {
        self.tree.begin()
    }

    pub fn end(&self) -> Cursor<'_, K, (), C> {
        self.tree.end()
    }

    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Range<'_, K> {
        Range {
            inner: self.tree.range(range),
        }
    }

    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        self.tree.check()
    }

    pub fn tree(&self) -> &RbTree<K, (), C> {
        &self.tree
    }
}

/// Keys of a [`SortedSet`] in order.
pub struct Iter<'a, K> {
    inner: cursor::Iter<'a, K, ()>,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

/// Keys of a [`SortedSet`] within a range.
pub struct Range<'a, K> {
    inner: cursor::Range<'a, K, ()>,
}

impl<'a, K> Iterator for Range<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<K> DoubleEndedIterator for Range<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K> FusedIterator for Range<'_, K> {}

impl<K: fmt::Debug, C> fmt::Debug for SortedSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, C> PartialEq for SortedSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, C> Eq for SortedSet<K, C> where C: Fn(&K, &K) -> Ordering {}

impl<K: PartialOrd, C> PartialOrd for SortedSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, C> Ord for SortedSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Ord> FromIterator<K> for SortedSet<K, fn(&K, &K) -> Ordering> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K, C> Extend<K> for SortedSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            self.insert(k);
        }
    }
}

impl<'a, K, C> IntoIterator for &'a SortedSet<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_contains_remove() {
        let mut set = SortedSet::new();
        assert!(set.insert(3));
        assert!(set.insert(1));
        assert!(!set.insert(3));
        assert!(set.contains(&1));
        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn pop_from_both_ends() {
        let mut set: SortedSet<i32> = (1..=4).collect();
        assert_eq!(set.pop_first(), Some(1));
        assert_eq!(set.pop_last(), Some(4));
        assert_eq!(set.first(), Some(&2));
        assert_eq!(set.last(), Some(&3));
        set.check_invariants().unwrap();
    }

    #[test]
    fn take_returns_stored_key() {
        let mut set = SortedSet::with_comparator(|a: &String, b: &String| {
            a.to_lowercase().cmp(&b.to_lowercase())
        });
        set.insert("Apple".to_string());
        assert!(!set.insert("APPLE".to_string()));
        assert_eq!(set.get(&"apple".to_string()).map(String::as_str), Some("Apple"));
        assert_eq!(set.take(&"aPPle".to_string()).as_deref(), Some("Apple"));
        assert!(set.is_empty());
    }

    #[test]
    fn insert_at_and_remove_at() {
        let mut set = SortedSet::new();
        for k in [5, 1, 9] {
            set.insert(k);
        }
        let (c, inserted) = set.insert_at(5);
        assert!(!inserted);
        assert_eq!(c.peek_prev(), Some((&1, &())));
        let node = c.index().unwrap();
        assert_eq!(set.remove_at(node), 5);

        let (c, inserted) = set.insert_at(7);
        assert!(inserted);
        assert_eq!(c.peek_next(), Some((&9, &())));

        let first = set.begin().index();
        let stop = set.find(&9).index();
        assert_eq!(set.remove_span(first, stop), 2);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![9]);
        set.check_invariants().unwrap();
    }

    #[test]
    fn range_and_debug() {
        let set: SortedSet<i32> = [5, 1, 9, 3, 7].into_iter().collect();
        assert_eq!(set.range(3..8).copied().collect::<Vec<_>>(), vec![3, 5, 7]);
        assert_eq!(set.range(3..8).rev().copied().collect::<Vec<_>>(), vec![7, 5, 3]);
        assert_eq!(format!("{set:?}"), "{1, 3, 5, 7, 9}");
    }
}
