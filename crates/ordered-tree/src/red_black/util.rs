use std::cmp::Ordering;

use crate::arena::Arena;
use crate::error::InvariantViolation;
use crate::types::{KvNode, RbNodeLike};
use crate::util::{first, next};

/// Verifies the red-black and search-tree invariants of the tree at `root`.
///
/// Checks root color, red-red edges, uniform black height, parent back-links,
/// strict in-order ordering, and that the tree reaches exactly `len` nodes.
/// Detached nodes in `arena` are not counted. Returns the black height (nil
/// counts as one).
pub fn check<N, C>(
    arena: &Arena<N>,
    root: Option<u32>,
    len: usize,
    comparator: &C,
) -> Result<usize, InvariantViolation>
where
    N: RbNodeLike + KvNode,
    C: Fn(&N::Key, &N::Key) -> Ordering,
{
    if let Some(r) = root {
        if arena[r].p().is_some() {
            return Err(InvariantViolation::RootHasParent { node: r });
        }
        if !arena[r].is_black() {
            return Err(InvariantViolation::RedRoot { node: r });
        }
    }

    let mut reachable = 0;
    let black_height = check_subtree(arena, root, len, &mut reachable)?;
    if reachable != len {
        return Err(InvariantViolation::LenMismatch { reachable, len });
    }

    let mut curr = first(arena, root);
    while let Some(i) = curr {
        let succ = next(arena, i);
        if let Some(n) = succ {
            if comparator(arena[i].key(), arena[n].key()) != Ordering::Less {
                return Err(InvariantViolation::OutOfOrder { node: i, next: n });
            }
        }
        curr = succ;
    }

    Ok(black_height)
}

fn check_subtree<N: RbNodeLike>(
    arena: &Arena<N>,
    node: Option<u32>,
    len: usize,
    reachable: &mut usize,
) -> Result<usize, InvariantViolation> {
    let Some(i) = node else {
        return Ok(1);
    };
    *reachable += 1;
    if *reachable > len {
        // Also stops on cyclic links.
        return Err(InvariantViolation::LenMismatch {
            reachable: *reachable,
            len,
        });
    }

    let n = &arena[i];
    for child in [n.l(), n.r()].into_iter().flatten() {
        if arena[child].p() != Some(i) {
            return Err(InvariantViolation::BrokenParentLink { node: i, child });
        }
        if !n.is_black() && !arena[child].is_black() {
            return Err(InvariantViolation::RedRed { node: i, child });
        }
    }

    let left = check_subtree(arena, n.l(), len, reachable)?;
    let right = check_subtree(arena, n.r(), len, reachable)?;
    if left != right {
        return Err(InvariantViolation::BlackHeight { node: i, left, right });
    }
    Ok(left + usize::from(n.is_black()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{default_comparator, RbNode};

    fn link(arena: &mut Arena<RbNode<i32, ()>>, parent: u32, child: u32, left: bool) {
        if left {
            arena[parent].l = Some(child);
        } else {
            arena[parent].r = Some(child);
        }
        arena[child].p = Some(parent);
    }

    fn node(arena: &mut Arena<RbNode<i32, ()>>, k: i32, black: bool) -> u32 {
        let i = arena.alloc(RbNode::new(k, ())).unwrap();
        arena[i].b = black;
        i
    }

    #[test]
    fn empty_tree_has_black_height_one() {
        let arena: Arena<RbNode<i32, ()>> = Arena::new();
        assert_eq!(check(&arena, None, 0, &default_comparator::<i32>), Ok(1));
    }

    #[test]
    fn detects_red_root() {
        let mut arena = Arena::new();
        let r = node(&mut arena, 1, false);
        assert_eq!(
            check(&arena, Some(r), arena.len(), &default_comparator::<i32>),
            Err(InvariantViolation::RedRoot { node: r })
        );
    }

    #[test]
    fn detects_red_red_edge() {
        let mut arena = Arena::new();
        let r = node(&mut arena, 2, true);
        let a = node(&mut arena, 1, false);
        let b = node(&mut arena, 0, false);
        let c = node(&mut arena, 3, false);
        link(&mut arena, r, a, true);
        link(&mut arena, a, b, true);
        link(&mut arena, r, c, false);
        assert_eq!(
            check(&arena, Some(r), arena.len(), &default_comparator::<i32>),
            Err(InvariantViolation::RedRed { node: a, child: b })
        );
    }

    #[test]
    fn detects_uneven_black_height() {
        let mut arena = Arena::new();
        let r = node(&mut arena, 2, true);
        let a = node(&mut arena, 1, true);
        link(&mut arena, r, a, true);
        assert!(matches!(
            check(&arena, Some(r), arena.len(), &default_comparator::<i32>),
            Err(InvariantViolation::BlackHeight { node, left: 2, right: 1 }) if node == r
        ));
    }

    #[test]
    fn detects_broken_parent_link() {
        let mut arena = Arena::new();
        let r = node(&mut arena, 2, true);
        let a = node(&mut arena, 1, false);
        arena[r].l = Some(a);
        assert_eq!(
            check(&arena, Some(r), arena.len(), &default_comparator::<i32>),
            Err(InvariantViolation::BrokenParentLink { node: r, child: a })
        );
    }

    #[test]
    fn detects_misordered_keys() {
        let mut arena = Arena::new();
        let r = node(&mut arena, 2, true);
        let a = node(&mut arena, 5, false);
        link(&mut arena, r, a, true);
        assert_eq!(
            check(&arena, Some(r), arena.len(), &default_comparator::<i32>),
            Err(InvariantViolation::OutOfOrder { node: a, next: r })
        );
    }

    #[test]
    fn detects_count_mismatch() {
        let mut arena = Arena::new();
        let r = node(&mut arena, 2, true);
        assert_eq!(
            check(&arena, Some(r), 2, &default_comparator::<i32>),
            Err(InvariantViolation::LenMismatch { reachable: 1, len: 2 })
        );
    }

    #[test]
    fn detached_nodes_are_not_counted() {
        let mut arena = Arena::new();
        let r = node(&mut arena, 2, true);
        node(&mut arena, 9, false);
        assert_eq!(check(&arena, Some(r), 1, &default_comparator::<i32>), Ok(2));
    }

    #[test]
    fn detects_cycle() {
        let mut arena = Arena::new();
        let r = node(&mut arena, 2, true);
        let a = node(&mut arena, 1, true);
        link(&mut arena, r, a, true);
        // a's left points back at the root
        arena[a].l = Some(r);
        assert!(check(&arena, Some(r), 2, &default_comparator::<i32>).is_err());
    }
}
