use crate::arena::Arena;
use crate::types::Node;

use super::last::last;

/// In-order predecessor of `node`. `None` before the minimum.
pub fn prev<N: Node>(arena: &Arena<N>, node: u32) -> Option<u32> {
    if let Some(l) = arena[node].l() {
        return last(arena, Some(l));
    }
    let mut child = node;
    let mut parent = arena[node].p();
    while let Some(p) = parent {
        if arena[p].r() == Some(child) {
            return Some(p);
        }
        child = p;
        parent = arena[p].p();
    }
    None
}
