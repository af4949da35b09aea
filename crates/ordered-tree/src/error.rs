//! Error types for tree storage and invariant checking.

use std::collections::TryReserveError;

use thiserror::Error;

/// Failure to obtain storage for a new node.
///
/// Returned before any link is touched, so the tree is unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node storage could not be allocated: {0}")]
    Alloc(#[from] TryReserveError),
    #[error("node arena exhausted the u32 handle space")]
    CapacityOverflow,
}

/// A broken red-black or search-tree property, reported by the checker.
///
/// Normal operations never produce this; it signals a bug in the balancer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root {node} is red")]
    RedRoot { node: u32 },
    #[error("root {node} has a parent link")]
    RootHasParent { node: u32 },
    #[error("red node {node} has red child {child}")]
    RedRed { node: u32, child: u32 },
    #[error("black height differs under node {node}: left {left}, right {right}")]
    BlackHeight { node: u32, left: usize, right: usize },
    #[error("child {child} does not link back to parent {node}")]
    BrokenParentLink { node: u32, child: u32 },
    #[error("node {node} does not order strictly before its successor {next}")]
    OutOfOrder { node: u32, next: u32 },
    #[error("tree reaches {reachable} nodes but records {len}")]
    LenMismatch { reachable: usize, len: usize },
}
