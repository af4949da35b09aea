//! Arena-based red-black tree and the ordered containers built on it.
//!
//! # Layout
//!
//! | Module      | Role                                                       |
//! |-------------|------------------------------------------------------------|
//! | `arena`     | Node store: slots addressed by `u32` handles, free list    |
//! | `util`      | Navigator: min/max, successor/predecessor, search, bounds  |
//! | `red_black` | Balancer: rotations, insert/remove fix-ups, checker        |
//! | `tree`      | `RbTree` facade composing the three                        |
//! | `cursor`    | Bidirectional cursor and iterators                         |
//! | `map`/`set` | `SortedMap` / `SortedSet`                                  |
//!
//! ```
//! use ordered_tree::SortedMap;
//!
//! let mut map = SortedMap::new();
//! map.insert(3, "c");
//! map.insert(1, "a");
//! assert!(!map.insert(1, "again"));
//!
//! let mut cursor = map.lower_bound(&2);
//! assert_eq!(cursor.key(), Some(&3));
//! cursor.move_next();
//! assert!(cursor.is_end());
//! ```

pub mod arena;
pub mod cursor;
pub mod error;
pub mod map;
pub mod red_black;
pub mod set;
pub mod tree;
pub mod types;
pub mod util;

#[cfg(feature = "serde")]
mod serde_impl;

pub use cursor::{Cursor, Iter, Range};
pub use error::{InvariantViolation, TreeError};
pub use map::SortedMap;
pub use set::SortedSet;
pub use tree::RbTree;
pub use types::{default_comparator, RbNode};
