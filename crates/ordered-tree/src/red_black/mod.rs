//! Red-black balancing over arena-linked nodes.
//!
//! Every function here takes the tree's root link by `&mut` so that
//! rotations and splices at the top of the tree rewrite it like any other
//! parent link.

mod util;

use std::cmp::Ordering;

use log::trace;

use crate::arena::Arena;
use crate::types::{KvNode, Node, RbNodeLike};

pub use util::check;

#[inline]
fn is_red<N: RbNodeLike>(arena: &Arena<N>, node: Option<u32>) -> bool {
    node.is_some_and(|i| !arena[i].is_black())
}

#[inline]
fn is_black<N: RbNodeLike>(arena: &Arena<N>, node: Option<u32>) -> bool {
    !is_red(arena, node)
}

/// Points whichever link of `parent` held `old` at `new`; the root link when
/// `parent` is `None`. Does not touch `new`'s parent link.
fn replace_child<N: Node>(
    arena: &mut Arena<N>,
    root: &mut Option<u32>,
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) {
    match parent {
        Some(p) => {
            if arena[p].l() == Some(old) {
                arena[p].set_l(new);
            } else {
                arena[p].set_r(new);
            }
        }
        None => *root = new,
    }
}

// ── Rotations ─────────────────────────────────────────────────────────────

/// Rotates `x` down to the left; its right child takes its place.
pub fn rotate_left<N: Node>(arena: &mut Arena<N>, root: &mut Option<u32>, x: u32) {
    let y = arena[x].r().expect("rotate_left requires a right child");
    trace!("rotate left at {x}");
    let p = arena[x].p();
    let yl = arena[y].l();

    arena[x].set_r(yl);
    if let Some(yl) = yl {
        arena[yl].set_p(Some(x));
    }
    arena[y].set_p(p);
    replace_child(arena, root, p, x, Some(y));
    arena[y].set_l(Some(x));
    arena[x].set_p(Some(y));
}

/// Rotates `x` down to the right; its left child takes its place.
pub fn rotate_right<N: Node>(arena: &mut Arena<N>, root: &mut Option<u32>, x: u32) {
    let y = arena[x].l().expect("rotate_right requires a left child");
    trace!("rotate right at {x}");
    let p = arena[x].p();
    let yr = arena[y].r();

    arena[x].set_l(yr);
    if let Some(yr) = yr {
        arena[yr].set_p(Some(x));
    }
    arena[y].set_p(p);
    replace_child(arena, root, p, x, Some(y));
    arena[y].set_r(Some(x));
    arena[x].set_p(Some(y));
}

// ── Insertion ─────────────────────────────────────────────────────────────

/// Links the detached `node` into the tree and rebalances.
///
/// Fails with the handle of the node holding an equal key when one exists;
/// `node` is then freed and the tree is left as it was.
pub fn insert<N, C>(
    arena: &mut Arena<N>,
    root: &mut Option<u32>,
    node: u32,
    comparator: &C,
) -> Result<(), u32>
where
    N: RbNodeLike + KvNode,
    C: Fn(&N::Key, &N::Key) -> Ordering,
{
    let Some(mut curr) = *root else {
        arena[node].set_black(true);
        *root = Some(node);
        return Ok(());
    };

    loop {
        match comparator(arena[node].key(), arena[curr].key()) {
            Ordering::Less => match arena[curr].l() {
                Some(l) => curr = l,
                None => {
                    arena[curr].set_l(Some(node));
                    break;
                }
            },
            Ordering::Greater => match arena[curr].r() {
                Some(r) => curr = r,
                None => {
                    arena[curr].set_r(Some(node));
                    break;
                }
            },
            Ordering::Equal => {
                arena.free(node);
                return Err(curr);
            }
        }
    }

    arena[node].set_p(Some(curr));
    arena[node].set_black(false);
    insert_fixup(arena, root, node);
    Ok(())
}

fn insert_fixup<N: RbNodeLike>(arena: &mut Arena<N>, root: &mut Option<u32>, mut n: u32) {
    trace!("insert fix-up from {n}");
    while let Some(mut p) = arena[n].p() {
        if arena[p].is_black() {
            break;
        }
        // A red parent is never the root, so the grandparent exists.
        let Some(g) = arena[p].p() else {
            break;
        };

        if arena[g].l() == Some(p) {
            let uncle = arena[g].r();
            if let Some(u) = uncle.filter(|&u| !arena[u].is_black()) {
                arena[p].set_black(true);
                arena[u].set_black(true);
                arena[g].set_black(false);
                n = g;
                continue;
            }
            if arena[p].r() == Some(n) {
                rotate_left(arena, root, p);
                std::mem::swap(&mut n, &mut p);
            }
            arena[p].set_black(true);
            arena[g].set_black(false);
            rotate_right(arena, root, g);
        } else {
            let uncle = arena[g].l();
            if let Some(u) = uncle.filter(|&u| !arena[u].is_black()) {
                arena[p].set_black(true);
                arena[u].set_black(true);
                arena[g].set_black(false);
                n = g;
                continue;
            }
            if arena[p].l() == Some(n) {
                rotate_right(arena, root, p);
                std::mem::swap(&mut n, &mut p);
            }
            arena[p].set_black(true);
            arena[g].set_black(false);
            rotate_left(arena, root, g);
        }
    }

    if let Some(r) = *root {
        arena[r].set_black(true);
    }
}

// ── Deletion ──────────────────────────────────────────────────────────────

/// Unlinks `z` from the tree, rebalances, and returns the freed node.
///
/// When `z` has a left subtree, the maximum of that subtree takes `z`'s
/// place; otherwise the minimum of its right subtree does; a leaf is simply
/// detached. The replacement node inherits `z`'s links and color, so handles
/// to every other node stay valid.
pub fn remove<N: RbNodeLike>(arena: &mut Arena<N>, root: &mut Option<u32>, z: u32) -> N {
    let zp = arena[z].p();
    let spliced_black;
    let x;
    let x_parent;

    if let Some(zl) = arena[z].l() {
        let mut y = zl;
        while let Some(r) = arena[y].r() {
            y = r;
        }
        spliced_black = arena[y].is_black();
        x = arena[y].l();
        if y == zl {
            x_parent = Some(y);
        } else {
            let yp = arena[y].p();
            x_parent = yp;
            if let Some(yp) = yp {
                arena[yp].set_r(x);
            }
            if let Some(x) = x {
                arena[x].set_p(yp);
            }
            arena[y].set_l(Some(zl));
            arena[zl].set_p(Some(y));
        }
        let zr = arena[z].r();
        arena[y].set_r(zr);
        if let Some(zr) = zr {
            arena[zr].set_p(Some(y));
        }
        transplant(arena, root, z, y);
    } else if let Some(zr) = arena[z].r() {
        let mut y = zr;
        while let Some(l) = arena[y].l() {
            y = l;
        }
        spliced_black = arena[y].is_black();
        x = arena[y].r();
        if y == zr {
            x_parent = Some(y);
        } else {
            let yp = arena[y].p();
            x_parent = yp;
            if let Some(yp) = yp {
                arena[yp].set_l(x);
            }
            if let Some(x) = x {
                arena[x].set_p(yp);
            }
            arena[y].set_r(Some(zr));
            arena[zr].set_p(Some(y));
        }
        transplant(arena, root, z, y);
    } else {
        spliced_black = arena[z].is_black();
        x = None;
        x_parent = zp;
        replace_child(arena, root, zp, z, None);
    }

    if spliced_black {
        remove_fixup(arena, root, x, x_parent);
    }

    arena.free(z)
}

/// Puts `y` where `z` hangs, with `z`'s parent and color.
fn transplant<N: RbNodeLike>(arena: &mut Arena<N>, root: &mut Option<u32>, z: u32, y: u32) {
    let zp = arena[z].p();
    replace_child(arena, root, zp, z, Some(y));
    arena[y].set_p(zp);
    let black = arena[z].is_black();
    arena[y].set_black(black);
}

/// Resolves a double-black deficiency at child slot `x` of `parent`.
///
/// `x` may be nil; its side is recovered from `parent`, whose other child
/// is non-nil whenever a deficiency exists.
fn remove_fixup<N: RbNodeLike>(
    arena: &mut Arena<N>,
    root: &mut Option<u32>,
    mut x: Option<u32>,
    mut parent: Option<u32>,
) {
    trace!("remove fix-up at {x:?} under {parent:?}");
    while x != *root && is_black(arena, x) {
        let Some(p) = parent else {
            break;
        };

        if arena[p].l() == x {
            let Some(mut w) = arena[p].r() else {
                break;
            };
            if !arena[w].is_black() {
                arena[w].set_black(true);
                arena[p].set_black(false);
                rotate_left(arena, root, p);
                let Some(s) = arena[p].r() else {
                    break;
                };
                w = s;
            }
            if is_black(arena, arena[w].l()) && is_black(arena, arena[w].r()) {
                arena[w].set_black(false);
                x = Some(p);
                parent = arena[p].p();
            } else {
                if is_black(arena, arena[w].r()) {
                    if let Some(wl) = arena[w].l() {
                        arena[wl].set_black(true);
                    }
                    arena[w].set_black(false);
                    rotate_right(arena, root, w);
                    let Some(s) = arena[p].r() else {
                        break;
                    };
                    w = s;
                }
                let black = arena[p].is_black();
                arena[w].set_black(black);
                arena[p].set_black(true);
                if let Some(wr) = arena[w].r() {
                    arena[wr].set_black(true);
                }
                rotate_left(arena, root, p);
                x = *root;
                break;
            }
        } else {
            let Some(mut w) = arena[p].l() else {
                break;
            };
            if !arena[w].is_black() {
                arena[w].set_black(true);
                arena[p].set_black(false);
                rotate_right(arena, root, p);
                let Some(s) = arena[p].l() else {
                    break;
                };
                w = s;
            }
            if is_black(arena, arena[w].l()) && is_black(arena, arena[w].r()) {
                arena[w].set_black(false);
                x = Some(p);
                parent = arena[p].p();
            } else {
                if is_black(arena, arena[w].l()) {
                    if let Some(wr) = arena[w].r() {
                        arena[wr].set_black(true);
                    }
                    arena[w].set_black(false);
                    rotate_left(arena, root, w);
                    let Some(s) = arena[p].l() else {
                        break;
                    };
                    w = s;
                }
                let black = arena[p].is_black();
                arena[w].set_black(black);
                arena[p].set_black(true);
                if let Some(wl) = arena[w].l() {
                    arena[wl].set_black(true);
                }
                rotate_right(arena, root, p);
                x = *root;
                break;
            }
        }
    }

    if let Some(x) = x {
        arena[x].set_black(true);
    }
}
