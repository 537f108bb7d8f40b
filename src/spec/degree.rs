//! Per-vertex degree constraints.
//!
//! Each frontier slot tracks the degree the vertex has accumulated among
//! taken edges. A slot saturates to `DONT_CARE` once the remaining incident
//! edges can no longer violate the vertex's constraint, which keeps the state
//! space small; conversely a branch is pruned as soon as the constraint is
//! unreachable even if every remaining incidence goes the right way.

use crate::graph::Graph;
use crate::hybrid::{HybridGraph, Item};
use crate::intset::IntSubset;
use crate::spec::{DdSpec, Step};

const DONT_CARE: i16 = -1;

/// Per-vertex admissible-degree logic shared by both variants.
struct DegreeRules {
    constraints: Vec<IntSubset>,
    /// Enables the reachability pruning and the `DONT_CARE` saturation.
    lookahead: bool,
}

impl DegreeRules {
    fn takable(&self, v: u32, deg: i16, out: bool, rem: usize) -> bool {
        let c = &self.constraints[v as usize];
        if deg == DONT_CARE || c.is_empty() {
            return true;
        }
        let deg = deg as i32;
        if self.lookahead && c.range_count(deg + 1, deg + 1 + rem as i32) == 0 {
            return false;
        }
        if c.upper() <= deg {
            return false;
        }
        !out || c.contains(deg + 1)
    }

    fn leavable(&self, v: u32, deg: i16, out: bool, rem: usize) -> bool {
        let c = &self.constraints[v as usize];
        if deg == DONT_CARE || c.is_empty() {
            return true;
        }
        let deg = deg as i32;
        if self.lookahead && c.range_count(deg, deg + rem as i32) == 0 {
            return false;
        }
        !out || c.contains(deg)
    }

    fn entry_value(&self, v: u32) -> i16 {
        if self.constraints[v as usize].is_empty() && self.lookahead {
            DONT_CARE
        } else {
            0
        }
    }

    fn update(&self, v: u32, deg: &mut i16, rem: usize, out: bool, take: bool) {
        if out {
            *deg = 0;
            return;
        }
        if *deg == DONT_CARE {
            return;
        }
        if take {
            *deg += 1;
        }
        let c = &self.constraints[v as usize];
        if self.lookahead
            && !c.is_empty()
            && c.range_count(*deg as i32, *deg as i32 + rem as i32) == rem + 1
        {
            *deg = DONT_CARE;
        }
    }
}

/// Edge-variable degree-constraint spec.
pub struct Degree<'a> {
    graph: &'a Graph,
    rules: DegreeRules,
    n: usize,
    f: usize,
}

impl<'a> Degree<'a> {
    pub fn new(graph: &'a Graph, constraints: Vec<IntSubset>, lookahead: bool) -> Self {
        assert!(graph.is_ordered(), "spec over an unordered graph");
        assert_eq!(constraints.len(), graph.num_vertices());
        Self {
            graph,
            rules: DegreeRules { constraints, lookahead },
            n: graph.num_edges(),
            f: graph.max_frontier_size(),
        }
    }
}

impl DdSpec for Degree<'_> {
    type State = Vec<i16>;

    fn root(&self) -> (Step, Self::State) {
        (Step::To(self.n), vec![0; self.f])
    }

    fn child(&self, deg: &mut Self::State, level: usize, take: bool) -> Step {
        let mut i = self.n - level;
        let edge = self.graph.edge(i);
        let info = self.graph.add_info(i);

        if edge.in1 {
            deg[edge.i1] = self.rules.entry_value(edge.v1);
        }
        if edge.in2 {
            deg[edge.i2] = self.rules.entry_value(edge.v2);
        }

        let ok = if take {
            self.rules.takable(edge.v1, deg[edge.i1], edge.out1, info.rm1)
                && self.rules.takable(edge.v2, deg[edge.i2], edge.out2, info.rm2)
        } else {
            self.rules.leavable(edge.v1, deg[edge.i1], edge.out1, info.rm1)
                && self.rules.leavable(edge.v2, deg[edge.i2], edge.out2, info.rm2)
        };
        if !ok {
            return Step::Reject;
        }

        i += 1;
        if i == self.n {
            return Step::Accept;
        }

        self.rules.update(edge.v1, &mut deg[edge.i1], info.rm1, edge.out1, take);
        self.rules.update(edge.v2, &mut deg[edge.i2], info.rm2, edge.out2, take);

        Step::To(self.n - i)
    }
}

/// Vertex+edge-variable degree-constraint spec; a vertex item is taken iff
/// its slot carries a nonzero mark.
pub struct DegreeHv<'a> {
    graph: &'a HybridGraph,
    rules: DegreeRules,
    n: usize,
    f: usize,
}

impl<'a> DegreeHv<'a> {
    pub fn new(graph: &'a HybridGraph, constraints: Vec<IntSubset>) -> Self {
        assert_eq!(constraints.len(), graph.num_vertices());
        Self {
            graph,
            rules: DegreeRules { constraints, lookahead: true },
            n: graph.num_items(),
            f: graph.max_frontier_size(),
        }
    }
}

impl DdSpec for DegreeHv<'_> {
    type State = Vec<i16>;

    fn root(&self) -> (Step, Self::State) {
        (Step::To(self.n), vec![0; self.f])
    }

    fn child(&self, deg: &mut Self::State, level: usize, take: bool) -> Step {
        let mut i = self.n - level;
        match *self.graph.item_af(i) {
            Item::Vertex { slot, .. } => {
                if deg[slot] == 0 && take {
                    return Step::Reject;
                }
                if deg[slot] != 0 && !take {
                    return Step::Reject;
                }
                deg[slot] = 0;
            }
            Item::Edge { v1, v2, i1, i2, in1, in2, out1, out2 } => {
                let info = self.graph.add_info_af(i);

                if in1 {
                    deg[i1] = self.rules.entry_value(v1);
                }
                if in2 {
                    deg[i2] = self.rules.entry_value(v2);
                }

                let ok = if take {
                    self.rules.takable(v1, deg[i1], out1, info.rm1)
                        && self.rules.takable(v2, deg[i2], out2, info.rm2)
                } else {
                    self.rules.leavable(v1, deg[i1], out1, info.rm1)
                        && self.rules.leavable(v2, deg[i2], out2, info.rm2)
                };
                if !ok {
                    return Step::Reject;
                }

                // The vertex item zeroes the slot, so `out` skips the update.
                if !out1 {
                    self.rules.update(v1, &mut deg[i1], info.rm1, false, take);
                }
                if !out2 {
                    self.rules.update(v2, &mut deg[i2], info.rm2, false, take);
                }
            }
        }

        i += 1;
        if i == self.n {
            return Step::Accept;
        }
        Step::To(self.n - i)
    }
}
