//! Iterator over the member sets of a diagram.
//!
//! Depth-first traversal emitting, for each path to `⊤`, the levels taken
//! along its 1-edges (in descending level order). Levels map back to items as
//! `item = top_level - level`, or to whatever column ids the caller supplies
//! for the matrix dump.
//!
//! The number of member sets can be exponential in the number of levels, so
//! use with care on large diagrams.

use crate::node::NodeRef;
use crate::structure::DdStructure;

impl DdStructure {
    /// Iterates over all member sets as lists of taken levels.
    pub fn sets(&self) -> ZddSets<'_> {
        ZddSets::new(self)
    }
}

pub struct ZddSets<'a> {
    dd: &'a DdStructure,
    stack: Vec<(NodeRef, Vec<u32>)>,
}

impl<'a> ZddSets<'a> {
    pub fn new(dd: &'a DdStructure) -> Self {
        Self {
            dd,
            stack: vec![(dd.root(), Vec::new())],
        }
    }
}

impl Iterator for ZddSets<'_> {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((r, set)) = self.stack.pop() {
            if r.is_zero() {
                continue;
            }
            if r.is_one() {
                return Some(set);
            }

            let node = self.dd.node(r);
            self.stack.push((node.lo, set.clone()));

            let mut taken = set;
            taken.push(r.level);
            self.stack.push((node.hi, taken));
        }
        None
    }
}
