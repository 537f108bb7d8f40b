//! DD node and node-reference types.
//!
//! Nodes are identified by `(level, column)` pairs rather than pointers: the
//! level table owns its node array and children are strictly downward
//! references, so the whole diagram is an arena indexed by level. The two
//! terminals live at level 0 — column 0 is `⊥` (false), column 1 is `⊤`
//! (true).

use std::fmt;

/// Reference to a node: a terminal or a `(level, column)` cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeRef {
    pub level: u32,
    pub col: u32,
}

impl NodeRef {
    /// The `⊥` terminal (empty family).
    pub const ZERO: Self = Self { level: 0, col: 0 };
    /// The `⊤` terminal (family containing the empty set).
    pub const ONE: Self = Self { level: 0, col: 1 };

    pub const fn new(level: u32, col: u32) -> Self {
        Self { level, col }
    }

    pub const fn is_terminal(self) -> bool {
        self.level == 0
    }

    pub const fn is_zero(self) -> bool {
        self.level == 0 && self.col == 0
    }

    pub const fn is_one(self) -> bool {
        self.level == 0 && self.col == 1
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "⊥")
        } else if self.is_one() {
            write!(f, "⊤")
        } else {
            write!(f, "{}:{}", self.level, self.col)
        }
    }
}

/// A decision node. `lo` is followed when the item is left out, `hi` when it
/// is taken. Levels skipped by either child are zero-forced (ZDD convention).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Node {
    pub lo: NodeRef,
    pub hi: NodeRef,
}

impl Node {
    pub const fn new(lo: NodeRef, hi: NodeRef) -> Self {
        Self { lo, hi }
    }
}
