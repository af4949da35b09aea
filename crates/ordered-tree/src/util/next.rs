use crate::arena::Arena;
use crate::types::Node;

use super::first::first;

/// In-order successor of `node`. `None` past the maximum.
///
/// Without a right subtree, climbs until arriving from a left child.
pub fn next<N: Node>(arena: &Arena<N>, node: u32) -> Option<u32> {
    if let Some(r) = arena[node].r() {
        return first(arena, Some(r));
    }
    let mut child = node;
    let mut parent = arena[node].p();
    while let Some(p) = parent {
        if arena[p].l() == Some(child) {
            return Some(p);
        }
        child = p;
        parent = arena[p].p();
    }
    None
}
