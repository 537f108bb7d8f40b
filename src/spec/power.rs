//! Power-set specs.
//!
//! The edge-variable form accepts every subset. The vertex+edge form accepts
//! every subset in which each selected vertex is incident to a selected edge
//! and vice versa; vertex items whose incidence flag is still clear are
//! zero-forced by skipping them.

use crate::hybrid::{HybridGraph, Item};
use crate::spec::{DdSpec, Step};

/// All `2^n` subsets of an `n`-item universe.
pub struct Power {
    n: usize,
}

impl Power {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl DdSpec for Power {
    type State = ();

    fn root(&self) -> (Step, Self::State) {
        if self.n == 0 {
            (Step::Accept, ())
        } else {
            (Step::To(self.n), ())
        }
    }

    fn child(&self, _state: &mut Self::State, level: usize, _take: bool) -> Step {
        if level == 1 {
            Step::Accept
        } else {
            Step::To(level - 1)
        }
    }
}

/// Power set over vertex and edge items: a vertex item must be taken iff some
/// incident edge is taken.
pub struct PowerHv<'a> {
    graph: &'a HybridGraph,
    n: usize,
    mate_size: usize,
}

impl<'a> PowerHv<'a> {
    pub fn new(graph: &'a HybridGraph) -> Self {
        Self {
            graph,
            n: graph.num_items(),
            mate_size: graph.max_frontier_size(),
        }
    }
}

impl DdSpec for PowerHv<'_> {
    type State = Vec<bool>;

    fn root(&self) -> (Step, Self::State) {
        (Step::To(self.n), vec![false; self.mate_size])
    }

    fn child(&self, mate: &mut Self::State, level: usize, take: bool) -> Step {
        assert!(1 <= level && level <= self.n);

        let mut i = self.n - level;
        match *self.graph.item_af(i) {
            Item::Vertex { slot, .. } => {
                if take && !mate[slot] {
                    return Step::Reject;
                }
                if !take && mate[slot] {
                    return Step::Reject;
                }
                mate[slot] = false;
            }
            Item::Edge { i1, i2, .. } => {
                if take {
                    mate[i1] = true;
                    mate[i2] = true;
                }
            }
        }

        i += 1;
        if i == self.n {
            return Step::Accept;
        }

        // Vertex items with no incident selection are forced out.
        loop {
            match *self.graph.item_af(i) {
                Item::Vertex { slot, .. } if !mate[slot] => {
                    i += 1;
                    if i == self.n {
                        return Step::Accept;
                    }
                }
                _ => break,
            }
        }

        Step::To(self.n - i)
    }
}
