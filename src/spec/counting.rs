//! Scalar counting constraints, meant to be intersected with the structural
//! specs: bound the number of selected edges, selected vertices, or selected
//! items from a candidate set.

use crate::hybrid::HybridGraph;
use crate::intset::IntSubset;
use crate::spec::{DdSpec, Step};

fn bounded_root(n: usize, constraint: &IntSubset) -> Step {
    if !constraint.is_empty() && constraint.lower() > n as i32 {
        Step::Reject
    } else {
        Step::To(n)
    }
}

fn unconstrained_step(level: usize) -> Step {
    if level == 1 {
        Step::Accept
    } else {
        Step::To(level - 1)
    }
}

/// Bounds the number of selected edge items.
pub struct EdgeCountHv<'a> {
    graph: &'a HybridGraph,
    n: usize,
    constraint: IntSubset,
}

impl<'a> EdgeCountHv<'a> {
    pub fn new(graph: &'a HybridGraph, constraint: IntSubset) -> Self {
        Self { graph, n: graph.num_items(), constraint }
    }
}

impl DdSpec for EdgeCountHv<'_> {
    type State = i32;

    fn root(&self) -> (Step, Self::State) {
        (bounded_root(self.n, &self.constraint), 0)
    }

    fn child(&self, counter: &mut Self::State, level: usize, take: bool) -> Step {
        assert!(1 <= level && level <= self.n);
        if self.constraint.is_empty() {
            return unconstrained_step(level);
        }

        let mut i = self.n - level;
        if !self.graph.item_af(i).is_vertex() && take {
            *counter += 1;
            if self.constraint.upper() < *counter {
                return Step::Reject;
            }
        }

        i += 1;
        if i == self.n {
            return if self.constraint.contains(*counter) {
                Step::Accept
            } else {
                Step::Reject
            };
        }
        Step::To(self.n - i)
    }
}

/// Bounds the number of selected vertex items.
pub struct VertexCountHv<'a> {
    graph: &'a HybridGraph,
    n: usize,
    constraint: IntSubset,
}

impl<'a> VertexCountHv<'a> {
    pub fn new(graph: &'a HybridGraph, constraint: IntSubset) -> Self {
        Self { graph, n: graph.num_items(), constraint }
    }
}

impl DdSpec for VertexCountHv<'_> {
    type State = i32;

    fn root(&self) -> (Step, Self::State) {
        (bounded_root(self.n, &self.constraint), 0)
    }

    fn child(&self, counter: &mut Self::State, level: usize, take: bool) -> Step {
        assert!(1 <= level && level <= self.n);
        if self.constraint.is_empty() {
            return unconstrained_step(level);
        }

        let mut i = self.n - level;
        if self.graph.item_af(i).is_vertex() && take {
            *counter += 1;
            if self.constraint.upper() < *counter {
                return Step::Reject;
            }
        }

        i += 1;
        if i == self.n {
            return if self.constraint.contains(*counter) {
                Step::Accept
            } else {
                Step::Reject
            };
        }
        Step::To(self.n - i)
    }
}

/// Bounds the number of selected items from an arbitrary candidate set.
pub struct ItemCount {
    n: usize,
    is_candidate: Vec<bool>,
    constraint: IntSubset,
}

impl ItemCount {
    pub fn new(n: usize, is_candidate: Vec<bool>, constraint: IntSubset) -> Self {
        assert_eq!(is_candidate.len(), n);
        Self { n, is_candidate, constraint }
    }
}

impl DdSpec for ItemCount {
    type State = i32;

    fn root(&self) -> (Step, Self::State) {
        (bounded_root(self.n, &self.constraint), 0)
    }

    fn child(&self, counter: &mut Self::State, level: usize, take: bool) -> Step {
        assert!(1 <= level && level <= self.n);
        if self.constraint.is_empty() {
            return unconstrained_step(level);
        }

        let mut i = self.n - level;
        if take {
            if self.is_candidate[i] {
                *counter += 1;
            }
            if self.constraint.upper() < *counter {
                return Step::Reject;
            }
        }

        i += 1;
        if i == self.n {
            return if self.constraint.contains(*counter) {
                Step::Accept
            } else {
                Step::Reject
            };
        }
        Step::To(self.n - i)
    }
}
