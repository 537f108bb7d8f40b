//! Vertex-induced subgraph families.
//!
//! Mate values: `DNC` — vertex not yet decided, `OUT` — excluded, ids `>= 0`
//! — included (a real component id in connected/forest modes, the bare `IN`
//! tag otherwise). Taking an edge commits both endpoints to the subgraph and
//! forces their still-undecided frontier neighbors out, because including one
//! of them later would add an induced edge the ZDD variable says is absent.
//! Leaving an edge whose endpoints are both included is rejected for the same
//! reason.

use crate::graph::Graph;
use crate::hybrid::{HybridGraph, Item};
use crate::intset::IntSubset;
use crate::spec::mate::{self, DNC, OUT};
use crate::spec::{DdSpec, Mode, Step};

const IN: i16 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InducedState {
    mate: Vec<i16>,
    counter: i16,
}

enum Verdict {
    Continue,
    Reject,
    Accept,
}

/// Pieces shared by the edge-var and hybrid induced specs.
struct Core {
    connected: bool,
    forest: bool,
    cc_constraint: IntSubset,
}

impl Core {
    fn new(mode: Mode, cc_constraint: IntSubset) -> Self {
        Self {
            connected: mode.is_connected(),
            forest: mode.is_forest(),
            cc_constraint,
        }
    }

    fn tracks_components(&self) -> bool {
        self.connected || self.forest
    }

    /// Forces still-undecided neighbors out of the subgraph.
    fn exclude_adj(&self, graph: &Graph, mate: &mut [i16], adj: &[u32]) {
        for &u in adj {
            let slot = graph.mate_slot(u);
            if mate[slot] == DNC {
                mate[slot] = OUT;
            }
        }
    }

    /// In forest mode a newly included vertex may not touch an already
    /// included neighbor; that edge was already decided and taking the vertex
    /// now would close a cycle in the induced graph.
    fn cycle_free(&self, graph: &Graph, mate: &[i16], adj: &[u32]) -> bool {
        adj.iter().all(|&u| mate[graph.mate_slot(u)] < IN)
    }

    fn include(&self, mate: &mut [i16]) -> i16 {
        if self.tracks_components() {
            mate::fresh_cc_id(mate)
        } else {
            IN
        }
    }

    fn take_edge(&self, graph: &Graph, mate: &mut [i16], i1: usize, i2: usize, adj1: &[u32], adj2: &[u32]) -> Verdict {
        if mate[i1] == OUT || mate[i2] == OUT {
            return Verdict::Reject;
        }
        if self.forest && mate[i1] >= IN && mate[i2] >= IN && mate[i1] == mate[i2] {
            return Verdict::Reject;
        }

        if mate[i1] == DNC {
            if self.forest && !self.cycle_free(graph, mate, adj1) {
                return Verdict::Reject;
            }
            mate[i1] = self.include(mate);
            self.exclude_adj(graph, mate, adj1);
        }
        if mate[i2] == DNC {
            if self.forest && !self.cycle_free(graph, mate, adj2) {
                return Verdict::Reject;
            }
            mate[i2] = self.include(mate);
            self.exclude_adj(graph, mate, adj2);
        }
        if mate[i1] != mate[i2] {
            mate::link(mate, i1, i2);
        }
        Verdict::Continue
    }

    fn leave_edge(&self, mate: &mut [i16], i1: usize, i2: usize) -> Verdict {
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

    fn retire(&self, state: &mut InducedState, slot: usize) -> Verdict {
        let cc = state.mate[slot];
        state.mate[slot] = DNC;

        if cc >= IN && !mate::component_live(&state.mate, cc) {
            if self.connected {
                return if mate::other_components(&state.mate, cc) {
                    Verdict::Reject
                } else {
                    Verdict::Accept
                };
            }
            if !self.cc_constraint.is_empty() {
                state.counter += 1;
                if self.cc_constraint.upper() == state.counter as i32 {
                    return if mate::other_components(&state.mate, cc) {
                        Verdict::Reject
                    } else {
                        Verdict::Accept
                    };
                }
            }
        }

        Verdict::Continue
    }

    fn finish(&self, state: &InducedState) -> Step {
        if self.connected {
            // Only the completion path accepts; reaching the end connected
            // means nothing was ever included.
            return Step::Reject;
        }
        if !self.cc_constraint.is_empty() && !self.cc_constraint.contains(state.counter as i32) {
            return Step::Reject;
        }
        Step::Accept
    }
}

/// Edge-variable induced-subgraph spec: accepted sets are exactly the edge
/// sets induced by some admissible vertex selection.
pub struct Induced<'a> {
    graph: &'a Graph,
    n: usize,
    mate_size: usize,
    core: Core,
}

impl<'a> Induced<'a> {
    pub fn new(graph: &'a Graph, mode: Mode, cc_constraint: IntSubset) -> Self {
        assert!(graph.is_ordered(), "spec over an unordered graph");
        Self {
            graph,
            n: graph.num_edges(),
            mate_size: graph.max_frontier_size(),
            core: Core::new(mode, cc_constraint),
        }
    }
}

impl DdSpec for Induced<'_> {
    type State = InducedState;

    fn root(&self) -> (Step, Self::State) {
        let state = InducedState {
            mate: vec![DNC; self.mate_size],
            counter: 0,
        };
        (Step::To(self.n), state)
    }

    fn child(&self, state: &mut Self::State, level: usize, take: bool) -> Step {
        assert!(1 <= level && level <= self.n);

        let mut i = self.n - level;
        let edge = self.graph.edge(i);
        let info = self.graph.add_info(i);

        let verdict = if take {
            self.core
                .take_edge(self.graph, &mut state.mate, edge.i1, edge.i2, &info.adj1, &info.adj2)
        } else {
            self.core.leave_edge(&mut state.mate, edge.i1, edge.i2)
        };
        if let Verdict::Reject = verdict {
            return Step::Reject;
        }

        if edge.out1 {
            match self.core.retire(state, edge.i1) {
                Verdict::Reject => return Step::Reject,
                Verdict::Accept => return Step::Accept,
                Verdict::Continue => {}
            }
        }
        if edge.out2 {
            match self.core.retire(state, edge.i2) {
                Verdict::Reject => return Step::Reject,
                Verdict::Accept => return Step::Accept,
                Verdict::Continue => {}
            }
        }

        i += 1;
        if i == self.n {
            return self.core.finish(state);
        }
        if (edge.out1 || edge.out2) && self.core.tracks_components() {
            mate::relabel(&mut state.mate);
        }
        Step::To(self.n - i)
    }
}

/// Vertex+edge-variable induced-subgraph spec; vertex items make the vertex
/// selection explicit, and `no_isolate` rejects included vertices with no
/// included neighbor.
pub struct InducedHv<'a> {
    graph: &'a HybridGraph,
    n: usize,
    mate_size: usize,
    no_isolate: bool,
    core: Core,
}

impl<'a> InducedHv<'a> {
    pub fn new(graph: &'a HybridGraph, mode: Mode, no_isolate: bool, cc_constraint: IntSubset) -> Self {
        Self {
            graph,
            n: graph.num_items(),
            mate_size: graph.max_frontier_size(),
            no_isolate,
            core: Core::new(mode, cc_constraint),
        }
    }
}

impl DdSpec for InducedHv<'_> {
    type State = InducedState;

    fn root(&self) -> (Step, Self::State) {
        let state = InducedState {
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
                if take && m == OUT {
                    return Step::Reject;
                }
                if !take && m >= IN {
                    return Step::Reject;
                }

                if take && m == DNC {
                    // Included but touched by no taken edge.
                    if self.no_isolate {
                        return Step::Reject;
                    }
                    let adj = &self.graph.add_info_af(i).adj;
                    state.mate[slot] = self.core.include(&mut state.mate);
                    for &u in adj {
                        let t = self.graph.mate_slot(u);
                        state.mate[t] = OUT;
                    }
                }

                match self.core.retire(state, slot) {
                    Verdict::Reject => return Step::Reject,
                    Verdict::Accept => return Step::Accept,
                    Verdict::Continue => {}
                }

                i += 1;
                if i == self.n {
                    return self.core.finish(state);
                }
                if self.core.tracks_components() {
                    mate::relabel(&mut state.mate);
                }
                Step::To(self.n - i)
            }
            Item::Edge { i1, i2, .. } => {
                let verdict = if take {
                    let info = self.graph.add_info_af(i);
                    self.core
                        .take_edge(self.graph, &mut state.mate, i1, i2, &info.adj1, &info.adj2)
                } else {
                    self.core.leave_edge(&mut state.mate, i1, i2)
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
