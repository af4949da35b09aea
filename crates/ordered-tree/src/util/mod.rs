//! Read-only navigation over an arena-linked binary search tree.

mod first;
mod last;
mod next;
mod prev;

use std::cmp::Ordering;

pub use first::first;
pub use last::last;
pub use next::next;
pub use prev::prev;

use crate::arena::Arena;
use crate::types::KvNode;

/// Exact-match search.
pub fn find<N, C>(arena: &Arena<N>, root: Option<u32>, key: &N::Key, comparator: &C) -> Option<u32>
where
    N: KvNode,
    C: Fn(&N::Key, &N::Key) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(arena[i].key(), key) {
            Ordering::Less => arena[i].r(),
            Ordering::Greater => arena[i].l(),
            Ordering::Equal => return Some(i),
        };
    }
    None
}

/// Node with the smallest key not less than `key`.
pub fn lower_bound<N, C>(
    arena: &Arena<N>,
    root: Option<u32>,
    key: &N::Key,
    comparator: &C,
) -> Option<u32>
where
    N: KvNode,
    C: Fn(&N::Key, &N::Key) -> Ordering,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        match comparator(arena[i].key(), key) {
            Ordering::Less => curr = arena[i].r(),
            Ordering::Greater => {
                res = Some(i);
                curr = arena[i].l();
            }
            Ordering::Equal => return Some(i),
        }
    }
    res
}

/// Node with the smallest key greater than `key`.
pub fn upper_bound<N, C>(
    arena: &Arena<N>,
    root: Option<u32>,
    key: &N::Key,
    comparator: &C,
) -> Option<u32>
where
    N: KvNode,
    C: Fn(&N::Key, &N::Key) -> Ordering,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        if comparator(arena[i].key(), key) == Ordering::Greater {
            res = Some(i);
            curr = arena[i].l();
        } else {
            curr = arena[i].r();
        }
    }
    res
}

/// Node with the largest key not greater than `key`.
pub fn reverse_lower_bound<N, C>(
    arena: &Arena<N>,
    root: Option<u32>,
    key: &N::Key,
    comparator: &C,
) -> Option<u32>
where
    N: KvNode,
    C: Fn(&N::Key, &N::Key) -> Ordering,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        match comparator(arena[i].key(), key) {
            Ordering::Less => {
                res = Some(i);
                curr = arena[i].r();
            }
            Ordering::Greater => curr = arena[i].l(),
            Ordering::Equal => return Some(i),
        }
    }
    res
}

/// Node with the largest key less than `key`.
pub fn reverse_upper_bound<N, C>(
    arena: &Arena<N>,
    root: Option<u32>,
    key: &N::Key,
    comparator: &C,
) -> Option<u32>
where
    N: KvNode,
    C: Fn(&N::Key, &N::Key) -> Ordering,
{
    let mut curr = root;
    let mut res = None;
    while let Some(i) = curr {
        if comparator(arena[i].key(), key) == Ordering::Less {
            res = Some(i);
            curr = arena[i].r();
        } else {
            curr = arena[i].l();
        }
    }
    res
}
