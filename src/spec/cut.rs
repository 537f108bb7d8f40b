//! Vertex-cut families, the dual of the induced-subgraph specs.
//!
//! Leaving an edge groups its endpoints on the same side (component id);
//! taking an edge separates them, which demands one endpoint be excluded.
//! The counter counts completed sides; acceptance requires the final count to
//! lie in the constraint, which defaults to `[2, V]` so that every accepted
//! selection actually disconnects the graph.

use crate::graph::Graph;
use crate::hybrid::{HybridGraph, Item};
use crate::intset::IntSubset;
use crate::spec::mate::{self, DNC, OUT};
use crate::spec::{DdSpec, Step};

const IN: i16 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexCutState {
    mate: Vec<i16>,
    counter: i16,
}

enum Verdict {
    Continue,
    Reject,
    Accept,
}

fn default_constraint(constraint: IntSubset, num_vertices: usize) -> IntSubset {
    // At least a bipartition; anything weaker cannot cut.
    if constraint.is_empty() || constraint.upper() < 2 {
        IntSubset::range(2, num_vertices as i32)
    } else {
        constraint
    }
}

fn group_edge(graph: &Graph, mate: &mut [i16], i1: usize, i2: usize, adj1: &[u32], adj2: &[u32]) -> Verdict {
    if mate[i1] == OUT || mate[i2] == OUT {
        return Verdict::Reject;
    }
    if mate[i1] == DNC {
        mate[i1] = mate::fresh_cc_id(mate);
        exclude_adj(graph, mate, adj1);
    }
    if mate[i2] == DNC {
        mate[i2] = mate::fresh_cc_id(mate);
        exclude_adj(graph, mate, adj2);
    }
    if mate[i1] != mate[i2] {
        mate::link(mate, i1, i2);
    }
    Verdict::Continue
}

fn separate_edge(mate: &mut [i16], i1: usize, i2: usize) -> Verdict {
    if mate[i1] >= IN && mate[i2] >= IN {
        return Verdict::Reject;
    }
    if mate[i1] >= IN {
        mate[i2] = OUT;
    }
    if mate[i2] >= IN {
        mate[i1] = OUT;
    }
    Verdict::Continue
}

fn exclude_adj(graph: &Graph, mate: &mut [i16], adj: &[u32]) {
    for &u in adj {
        let slot = graph.mate_slot(u);
        if mate[slot] == DNC {
            mate[slot] = OUT;
        }
    }
}

/// Edge-variable cut spec: taken edges cross the cut.
pub struct VertexCut<'a> {
    graph: &'a Graph,
    n: usize,
    mate_size: usize,
    constraint: IntSubset,
}

impl<'a> VertexCut<'a> {
    pub fn new(graph: &'a Graph, constraint: IntSubset) -> Self {
        assert!(graph.is_ordered(), "spec over an unordered graph");
        Self {
            graph,
            n: graph.num_edges(),
            mate_size: graph.max_frontier_size(),
            constraint: default_constraint(constraint, graph.num_vertices()),
        }
    }

    fn retire(&self, state: &mut VertexCutState, slot: usize) -> Verdict {
        let cc = state.mate[slot];
        state.mate[slot] = DNC;

        if cc >= IN && !mate::component_live(&state.mate, cc) {
            state.counter += 1;
            if self.constraint.upper() == state.counter as i32 {
                return if mate::other_components(&state.mate, cc) {
                    Verdict::Reject
                } else {
                    Verdict::Accept
                };
            }
        }
        Verdict::Continue
    }
}

impl DdSpec for VertexCut<'_> {
    type State = VertexCutState;

    fn root(&self) -> (Step, Self::State) {
        let state = VertexCutState {
            mate: vec![DNC; self.mate_size],
            counter: 0,
        };
        (Step::To(self.n), state)
    }

    fn child(&self, state: &mut Self::State, level: usize, take: bool) -> Step {
        assert!(1 <= level && level <= self.n);

        let mut i = self.n - level;
        let edge = self.graph.edge(i);

        let verdict = if take {
            separate_edge(&mut state.mate, edge.i1, edge.i2)
        } else {
            let info = self.graph.add_info(i);
            group_edge(self.graph, &mut state.mate, edge.i1, edge.i2, &info.adj1, &info.adj2)
        };
        if let Verdict::Reject = verdict {
            return Step::Reject;
        }

        if edge.out1 {
            match self.retire(state, edge.i1) {
                Verdict::Reject => return Step::Reject,
                Verdict::Accept => return Step::Accept,
                Verdict::Continue => {}
            }
        }
        if edge.out2 {
            match self.retire(state, edge.i2) {
                Verdict::Reject => return Step::Reject,
                Verdict::Accept => return Step::Accept,
                Verdict::Continue => {}
            }
        }

        i += 1;
        if i == self.n {
            return if self.constraint.contains(state.counter as i32) {
                Step::Accept
            } else {
                Step::Reject
            };
        }
        mate::relabel(&mut state.mate);
        Step::To(self.n - i)
    }
}

/// Vertex+edge-variable cut spec: taken vertex items are the deleted
/// vertices, and the sides are the components of what remains.
pub struct VertexCutHv<'a> {
    graph: &'a HybridGraph,
    n: usize,
    mate_size: usize,
    constraint: IntSubset,
}

impl<'a> VertexCutHv<'a> {
    pub fn new(graph: &'a HybridGraph, constraint: IntSubset) -> Self {
        Self {
            graph,
            n: graph.num_items(),
            mate_size: graph.max_frontier_size(),
            constraint: default_constraint(constraint, graph.num_vertices()),
        }
    }
}

impl DdSpec for VertexCutHv<'_> {
    type State = VertexCutState;

    fn root(&self) -> (Step, Self::State) {
        let state = VertexCutState {
            mate: vec![DNC; self.mate_size],
            counter: 0,
        };
        (Step::To(self.n), state)
    }

    fn child(&self, state: &mut Self::State, level: usize, take: bool) -> Step {
        assert!(1 <= level && level <= self.n);

        let mut i = self.n - level;
        match *self.graph.item_af(i) {
            Item::Vertex { slot, .. } => {
                let m = state.mate[slot];
                if !take && m == OUT {
                    return Step::Reject;
                }
                if take && m >= IN {
                    return Step::Reject;
                }

                if !take && m == DNC {
                    // Kept vertex never grouped through a kept edge: a fresh
                    // side of its own; its surviving neighbors must go.
                    let adj = &self.graph.add_info_af(i).adj;
                    state.mate[slot] = mate::fresh_cc_id(&state.mate);
                    for &u in adj {
                        let t = self.graph.mate_slot(u);
                        state.mate[t] = OUT;
                    }
                }

                let cc = state.mate[slot];
                state.mate[slot] = DNC;

                if cc >= IN && !mate::component_live(&state.mate, cc) {
                    state.counter += 1;
                    if self.constraint.upper() < state.counter as i32 {
                        return Step::Reject;
                    }
                }

                i += 1;
                if i == self.n {
                    return if self.constraint.contains(state.counter as i32) {
                        Step::Accept
                    } else {
                        Step::Reject
                    };
                }
                mate::relabel(&mut state.mate);
                Step::To(self.n - i)
            }
            Item::Edge { i1, i2, .. } => {
                let verdict = if take {
                    separate_edge(&mut state.mate, i1, i2)
                } else {
                    let info = self.graph.add_info_af(i);
                    group_edge(self.graph, &mut state.mate, i1, i2, &info.adj1, &info.adj2)
                };
                if let Verdict::Reject = verdict {
                    return Step::Reject;
                }

                i += 1;
                assert!(i != self.n, "item sequences end with a vertex item");
                Step::To(self.n - i)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::graph::Ordering;

    fn reduced_count<S: DdSpec>(spec: &S) -> String {
        let mut dd = build(spec);
        dd.zdd_reduce();
        dd.cardinality().to_string()
    }

    #[test]
    fn test_bowtie_edge_shadow_of_cut_vertex() {
        // Two triangles sharing vertex 2. Deleting 2 leaves sides {0,1} and
        // {3,4}; its edge shadow takes the four edges at 2 and keeps the two
        // outer edges. Sides are built from kept edges, so this is the only
        // selection reaching two components.
        let mut g = Graph::new(5);
        for (u, v) in [(0, 1), (0, 2), (1, 2), (2, 3), (2, 4), (3, 4)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();

        let spec = VertexCut::new(&g, IntSubset::new());
        assert_eq!(reduced_count(&spec), "1");
    }

    #[test]
    fn test_hybrid_cut_vertices_of_path3() {
        let mut g = HybridGraph::new(3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.set_order(Ordering::AsIs).unwrap();

        // Deleting the middle vertex leaves {0} and {2}: the only vertex cut
        // of a 3-path.
        let spec = VertexCutHv::new(&g, IntSubset::new());
        assert_eq!(reduced_count(&spec), "1");
    }
}
