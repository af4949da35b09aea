use crate::arena::Arena;
use crate::types::Node;

/// Minimum of the subtree at `root`; `None` for an empty subtree.
pub fn first<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = arena[curr].l() {
        curr = l;
    }
    Some(curr)
}
