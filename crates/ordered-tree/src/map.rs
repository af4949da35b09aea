//! Ordered map of unique keys.

use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeBounds;

use crate::cursor::{Cursor, Iter, Range};
use crate::error::{InvariantViolation, TreeError};
use crate::tree::RbTree;

/// Ordered key-value map backed by a red-black tree.
///
/// Keys are unique: inserting an existing key is rejected and leaves the
/// stored value alone. Ordering comes from the comparator given at
/// construction, `Ord` for [`SortedMap::new`].
#[derive(Clone)]
pub struct SortedMap<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    tree: RbTree<K, V, C>,
}

impl<K, V> SortedMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self { tree: RbTree::new() }
    }
}

impl<K, V> Default for SortedMap<K, V, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> SortedMap<K, V, C>
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

    /// Inserts `key` unless an equal key is present. Returns whether it was
    /// inserted; a rejected `value` is dropped.
    ///
    /// # Panics
    ///
    /// If node storage cannot be obtained. Use [`try_insert`] to handle that.
    ///
    /// [`try_insert`]: SortedMap::try_insert
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.try_insert(key, value) {
            Ok(inserted) => inserted,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_insert(&mut self, key: K, value: V) -> Result<bool, TreeError> {
        self.tree.try_insert(key, value)
    }

    /// Like [`insert`], but also returns a cursor at the entry holding `key`,
    /// whether it was just inserted or was already there.
    ///
    /// # Panics
    ///
    /// If node storage cannot be obtained.
    ///
    /// [`insert`]: SortedMap::insert
    pub fn insert_at(&mut self, key: K, value: V) -> (Cursor<'_, K, V, C>, bool) {
        match self.try_insert_at(key, value) {
            Ok(pair) => pair,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_insert_at(
        &mut self,
        key: K,
        value: V,
    ) -> Result<(Cursor<'_, K, V, C>, bool), TreeError> {
        let (node, inserted) = self.tree.try_insert_at(key, value)?;
        Ok((self.tree.cursor(Some(node)), inserted))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.find(key).map(|i| self.tree.entry(i))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// Value for `key`, inserting `V::default()` first when it is missing.
    ///
    /// # Panics
    ///
    /// If node storage cannot be obtained.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let node = match self.tree.find(&key) {
            Some(node) => node,
            None => match self.tree.try_insert_at(key, V::default()) {
                Ok((node, _)) => node,
                Err(err) => panic!("{err}"),
            },
        };
        self.tree.value_mut(node)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.tree.remove(key)
    }

    /// Removes the entry at a cursor position, given as [`Cursor::index`].
    ///
    /// Other positions stay valid, so a successor taken beforehand can be
    /// used to keep walking.
    ///
    /// # Panics
    ///
    /// If `node` does not name an entry of this map.
    pub fn remove_at(&mut self, node: u32) -> (K, V) {
        self.tree.remove_node(node)
    }

    /// Removes the entries from position `first` up to, not including,
    /// `last`. `None` is the end position. Returns how many were removed.
    pub fn remove_span(&mut self, first: Option<u32>, last: Option<u32>) -> usize {
        self.tree.remove_span(first, last)
    }

    /// Removes every entry whose key is in `range`; returns how many.
    pub fn remove_range<R: RangeBounds<K>>(&mut self, range: R) -> usize {
        self.tree.remove_range(range)
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|i| self.tree.entry(i))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|i| self.tree.entry(i))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let node = self.tree.first()?;
        Some(self.tree.remove_node(node))
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let node = self.tree.last()?;
        Some(self.tree.remove_node(node))
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Cursor at `key`, or the end position if it is absent.
    pub fn find(&self, key: &K) -> Cursor<'_, K, V, C> {
        self.tree.cursor(self.tree.find(key))
    }

    /// Cursor at the first key not less than `key`.
    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        self.tree.cursor(self.tree.lower_bound(key))
    }

    /// Cursor at the first key greater than `key`.
    pub fn upper_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        self.tree.cursor(self.tree.upper_bound(key))
    }

    /// `(lower_bound(key), upper_bound(key))`.
    pub fn equal_range(&self, key: &K) -> (Cursor<'_, K, V, C>, Cursor<'_, K, V, C>) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    pub fn begin(&self) -> Cursor<'_, K, V, C> {
        self.tree.begin()
    }

    pub fn end(&self) -> Cursor<'_, K, V, C> {
        self.tree.end()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Range<'_, K, V> {
        self.tree.range(range)
    }

    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        self.tree.check()
    }

    pub fn tree(&self) -> &RbTree<K, V, C> {
        &self.tree
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for SortedMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for SortedMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for SortedMap<K, V, C> where C: Fn(&K, &K) -> Ordering {}

impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for SortedMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, C> Ord for SortedMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SortedMap<K, V, fn(&K, &K) -> Ordering> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C> Extend<(K, V)> for SortedMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a SortedMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
