use crate::arena::Arena;
use crate::types::Node;

/// Maximum of the subtree at `root`; `None` for an empty subtree.
pub fn last<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = arena[curr].r() {
        curr = r;
    }
    Some(curr)
}
