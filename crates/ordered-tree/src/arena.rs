//! Node store: index-addressed slots with a free list.
//!
//! A handle (`u32`) stays valid until its node is freed, no matter how the
//! tree is restructured around it. Freed slots are recycled by later
//! allocations.

use std::ops::{Index, IndexMut};

use log::{debug, trace, warn};

use crate::error::TreeError;
use crate::types::Node;

#[derive(Clone, Debug)]
pub struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<u32>,
    len: usize,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Arena<N> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `node` and returns its handle.
    pub fn alloc(&mut self, node: N) -> Result<u32, TreeError> {
        if let Some(idx) = self.free.pop() {
            trace!("reusing node slot {idx}");
            self.slots[idx as usize] = Some(node);
            self.len += 1;
            return Ok(idx);
        }

        let idx = handle_for(self.slots.len())?;
        if let Err(err) = self.slots.try_reserve(1) {
            warn!("node slot reservation failed at {} slots: {err}", self.slots.len());
            return Err(TreeError::Alloc(err));
        }
        self.slots.push(Some(node));
        self.len += 1;
        Ok(idx)
    }

    /// Releases the slot at `idx` and returns the node it held.
    ///
    /// The node must already be unlinked from any tree.
    pub fn free(&mut self, idx: u32) -> N {
        let node = self.slots[idx as usize]
            .take()
            .unwrap_or_else(|| panic!("double free of node slot {idx}"));
        self.free.push(idx);
        self.len -= 1;
        trace!("freed node slot {idx}");
        node
    }

    pub fn get(&self, idx: u32) -> Option<&N> {
        self.slots.get(idx as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut N> {
        self.slots.get_mut(idx as usize).and_then(Option::as_mut)
    }

    /// Drops every node and the slot storage.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

/// Handle for the slot at `pos`, if it fits in `u32`.
fn handle_for(pos: usize) -> Result<u32, TreeError> {
    u32::try_from(pos).map_err(|_| TreeError::CapacityOverflow)
}

impl<N: Node> Arena<N> {
    /// Frees the whole subtree hanging off `link` and nulls the link.
    ///
    /// Uses an explicit worklist. Returns the number of freed nodes.
    pub fn clear_subtree(&mut self, link: &mut Option<u32>) -> usize {
        let mut stack: Vec<u32> = link.take().into_iter().collect();
        let mut freed = 0;
        while let Some(idx) = stack.pop() {
            // Both child links are read before the slot is released.
            let node = &self[idx];
            stack.extend(node.l());
            stack.extend(node.r());
            self.free(idx);
            freed += 1;
        }
        debug!("cleared subtree of {freed} nodes");
        freed
    }
}

impl<N> Index<u32> for Arena<N> {
    type Output = N;

    fn index(&self, idx: u32) -> &N {
        self.slots[idx as usize]
            .as_ref()
            .unwrap_or_else(|| panic!("dangling node handle {idx}"))
    }
}

impl<N> IndexMut<u32> for Arena<N> {
    fn index_mut(&mut self, idx: u32) -> &mut N {
        self.slots[idx as usize]
            .as_mut()
            .unwrap_or_else(|| panic!("dangling node handle {idx}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RbNode;

    #[test]
    fn alloc_reuses_freed_slots() {
        let mut arena = Arena::new();
        let a = arena.alloc(RbNode::new(1, ())).unwrap();
        let b = arena.alloc(RbNode::new(2, ())).unwrap();
        assert_eq!((a, b), (0, 1));
        assert_eq!(arena.len(), 2);

        let node = arena.free(a);
        assert_eq!(node.k, 1);
        assert_eq!(arena.len(), 1);
        assert!(arena.get(a).is_none());

        let c = arena.alloc(RbNode::new(3, ())).unwrap();
        assert_eq!(c, a);
        assert_eq!(arena[c].k, 3);
    }

    #[test]
    fn new_nodes_are_red_and_detached() {
        let mut arena = Arena::new();
        let a = arena.alloc(RbNode::new("k", 7)).unwrap();
        let n = &arena[a];
        assert!(!n.b);
        assert_eq!((n.p, n.l, n.r), (None, None, None));
    }

    #[test]
    #[should_panic(expected = "double free")]
    fn double_free_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(RbNode::new(1, ())).unwrap();
        arena.free(a);
        arena.free(a);
    }

    #[test]
    #[should_panic(expected = "dangling node handle")]
    fn index_of_freed_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(RbNode::new(1, ())).unwrap();
        arena.free(a);
        let _ = &arena[a];
    }

    #[test]
    fn clear_subtree_frees_every_reachable_node() {
        let mut arena = Arena::new();
        let root = arena.alloc(RbNode::new(2, ())).unwrap();
        let l = arena.alloc(RbNode::new(1, ())).unwrap();
        let r = arena.alloc(RbNode::new(3, ())).unwrap();
        let rr = arena.alloc(RbNode::new(4, ())).unwrap();
        arena[root].l = Some(l);
        arena[root].r = Some(r);
        arena[l].p = Some(root);
        arena[r].p = Some(root);
        arena[r].r = Some(rr);
        arena[rr].p = Some(r);

        let mut link = Some(root);
        assert_eq!(arena.clear_subtree(&mut link), 4);
        assert_eq!(link, None);
        assert!(arena.is_empty());

        let mut empty = None;
        assert_eq!(arena.clear_subtree(&mut empty), 0);
    }

    #[test]
    fn clear_resets_slots() {
        let mut arena = Arena::new();
        arena.alloc(RbNode::new(1, ())).unwrap();
        arena.alloc(RbNode::new(2, ())).unwrap();
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.alloc(RbNode::new(3, ())).unwrap(), 0);
    }

    #[test]
    fn handles_stop_at_u32_space() {
        assert_eq!(handle_for(u32::MAX as usize), Ok(u32::MAX));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(handle_for(u32::MAX as usize + 1), Err(TreeError::CapacityOverflow));
        assert_eq!(
            TreeError::CapacityOverflow.to_string(),
            "node arena exhausted the u32 handle space"
        );
    }

    #[test]
    fn reservation_failure_converts_to_tree_error() {
        let reserve_err = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let err = TreeError::from(reserve_err.clone());
        assert_eq!(err, TreeError::Alloc(reserve_err));
        assert!(err.to_string().starts_with("node storage could not be allocated"));
    }
}
