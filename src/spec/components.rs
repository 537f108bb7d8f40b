//! Connected components, spanning forests/trees and Steiner variants.
//!
//! The mate array maps each frontier slot to a component id; alongside it the
//! state carries one flag per slot telling whether the slot's component has
//! absorbed a terminal, a count of completed components, and the number of
//! terminals not yet discharged.
//!
//! Coverage discipline: outside Steiner mode every vertex must retire inside
//! a component (the families are spanning), so `connected`/`tree` acceptance
//! can only fire when the last component completes on the final item. With
//! terminals, only terminals must be covered; other vertices may stay
//! untouched, but a completed component that never contained a terminal is
//! rejected.

use crate::graph::Graph;
use crate::hybrid::{HybridGraph, Item};
use crate::intset::IntSubset;
use crate::spec::mate::{self, NIL};
use crate::spec::{DdSpec, Mode, Step};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentsState {
    mate: Vec<i16>,
    /// Per-slot copy of "this slot's component contains a terminal".
    term: Vec<bool>,
    /// Completed components.
    counter: i32,
    /// Terminals not yet discharged into a component.
    residue: u16,
}

impl ComponentsState {
    fn new(mate_size: usize, residue: u16) -> Self {
        Self {
            mate: vec![NIL; mate_size],
            term: vec![false; mate_size],
            counter: 0,
            residue,
        }
    }
}

/// Unions the components of two slots, merging their terminal flags.
fn link_flagged(mate: &mut [i16], term: &mut [bool], i1: usize, i2: usize) {
    let flag = term[i1] || term[i2];
    mate::link(mate, i1, i2);
    let id = mate[i1];
    for (slot, &m) in mate.iter().enumerate() {
        if m == id {
            term[slot] = flag;
        }
    }
}

/// What common component bookkeeping decided about the current branch.
enum Verdict {
    Continue,
    Reject,
    Accept,
}

/// Shared knobs of the edge-var and hybrid component specs.
struct Knobs {
    connected: bool,
    forest: bool,
    steiner: bool,
    cc_constraint: IntSubset,
    terminals: IntSubset,
}

impl Knobs {
    fn new(mode: Mode, cc_constraint: IntSubset, terminals: IntSubset) -> Self {
        assert!(terminals.len() <= u16::MAX as usize, "too many terminals");
        Self {
            connected: mode.is_connected(),
            forest: mode.is_forest(),
            steiner: !terminals.is_empty(),
            cc_constraint,
            terminals,
        }
    }

    fn take_edge(&self, state: &mut ComponentsState, i1: usize, i2: usize, v1: u32, v2: u32) -> Verdict {
        let (m1, m2) = (state.mate[i1], state.mate[i2]);
        if self.forest && m1 >= 0 && m2 >= 0 && m1 == m2 {
            return Verdict::Reject;
        }
        if state.mate[i1] == NIL {
            state.mate[i1] = mate::fresh_cc_id(&state.mate);
            state.term[i1] = self.steiner && self.terminals.contains(v1 as i32);
        }
        if state.mate[i2] == NIL {
            state.mate[i2] = mate::fresh_cc_id(&state.mate);
            state.term[i2] = self.steiner && self.terminals.contains(v2 as i32);
        }
        if state.mate[i1] != state.mate[i2] {
            link_flagged(&mut state.mate, &mut state.term, i1, i2);
        }
        Verdict::Continue
    }

    /// Retires the vertex held in `slot`. `last` is true on the final item,
    /// the only point where a spanning family may close its last component.
    fn retire(&self, state: &mut ComponentsState, slot: usize, v: u32, last: bool) -> Verdict {
        if self.steiner {
            if self.terminals.contains(v as i32) {
                if state.mate[slot] == NIL {
                    return Verdict::Reject;
                }
                state.residue -= 1;
            }
        } else if state.mate[slot] == NIL {
            // Spanning families leave no vertex behind.
            return Verdict::Reject;
        }

        let cc = state.mate[slot];
        let flag = state.term[slot];
        state.mate[slot] = NIL;
        state.term[slot] = false;

        if cc >= 0 && !mate::component_live(&state.mate, cc) {
            if self.steiner && !flag {
                return Verdict::Reject;
            }
            if self.connected {
                if mate::other_components(&state.mate, cc) {
                    return Verdict::Reject;
                }
                let done = if self.steiner { state.residue == 0 } else { last };
                return if done { Verdict::Accept } else { Verdict::Reject };
            }
            if !self.cc_constraint.is_empty() {
                state.counter += 1;
                if self.cc_constraint.upper() == state.counter {
                    if mate::other_components(&state.mate, cc) {
                        return Verdict::Reject;
                    }
                    let done = if self.steiner { state.residue == 0 } else { last };
                    return if done { Verdict::Accept } else { Verdict::Reject };
                }
            }
        }

        Verdict::Continue
    }

    fn finish(&self, state: &ComponentsState) -> Step {
        if self.connected {
            // Acceptance only happens through the completion path above.
            return Step::Reject;
        }
        if self.steiner && state.residue > 0 {
            return Step::Reject;
        }
        if !self.cc_constraint.is_empty() && !self.cc_constraint.contains(state.counter) {
            return Step::Reject;
        }
        Step::Accept
    }
}

/// Edge-variable component spec (modes `connected`, `forest`, `tree`, plus
/// component-count and Steiner constraints).
pub struct Components<'a> {
    graph: &'a Graph,
    n: usize,
    mate_size: usize,
    knobs: Knobs,
}

impl<'a> Components<'a> {
    pub fn new(graph: &'a Graph, mode: Mode, cc_constraint: IntSubset, terminals: IntSubset) -> Self {
        assert!(graph.is_ordered(), "spec over an unordered graph");
        Self {
            graph,
            n: graph.num_edges(),
            mate_size: graph.max_frontier_size(),
            knobs: Knobs::new(mode, cc_constraint, terminals),
        }
    }
}

impl DdSpec for Components<'_> {
    type State = ComponentsState;

    fn root(&self) -> (Step, Self::State) {
        let residue = if self.knobs.steiner {
            self.knobs.terminals.len() as u16
        } else {
            0
        };
        (Step::To(self.n), ComponentsState::new(self.mate_size, residue))
    }

    fn child(&self, state: &mut Self::State, level: usize, take: bool) -> Step {
        assert!(1 <= level && level <= self.n);

        let mut i = self.n - level;
        let edge = self.graph.edge(i);
        let last = level == 1;

        if take {
            if let Verdict::Reject = self.knobs.take_edge(state, edge.i1, edge.i2, edge.v1, edge.v2) {
                return Step::Reject;
            }
        }

        if edge.out1 {
            match self.knobs.retire(state, edge.i1, edge.v1, last) {
                Verdict::Reject => return Step::Reject,
                Verdict::Accept => return Step::Accept,
                Verdict::Continue => {}
            }
        }
        if edge.out2 {
            match self.knobs.retire(state, edge.i2, edge.v2, last) {
                Verdict::Reject => return Step::Reject,
                Verdict::Accept => return Step::Accept,
                Verdict::Continue => {}
            }
        }

        i += 1;
        if i == self.n {
            return self.knobs.finish(state);
        }

        if edge.out1 || edge.out2 {
            mate::relabel(&mut state.mate);
        }
        Step::To(self.n - i)
    }
}

/// Vertex+edge-variable component spec over the "after" item sequence. A
/// vertex item must be taken iff the vertex ended up in a component.
pub struct ComponentsHv<'a> {
    graph: &'a HybridGraph,
    n: usize,
    mate_size: usize,
    knobs: Knobs,
}

impl<'a> ComponentsHv<'a> {
    pub fn new(
        graph: &'a HybridGraph,
        mode: Mode,
        cc_constraint: IntSubset,
        terminals: IntSubset,
    ) -> Self {
        Self {
            graph,
            n: graph.num_items(),
            mate_size: graph.max_frontier_size(),
            knobs: Knobs::new(mode, cc_constraint, terminals),
        }
    }
}

impl DdSpec for ComponentsHv<'_> {
    type State = ComponentsState;

    fn root(&self) -> (Step, Self::State) {
        let residue = if self.knobs.steiner {
            self.knobs.terminals.len() as u16
        } else {
            0
        };
        (Step::To(self.n), ComponentsState::new(self.mate_size, residue))
    }

    fn child(&self, state: &mut Self::State, level: usize, take: bool) -> Step {
        assert!(1 <= level && level <= self.n);

        let mut i = self.n - level;
        match *self.graph.item_af(i) {
            Item::Vertex { v, slot } => {
                let m = state.mate[slot];
                if take && m == NIL {
                    return Step::Reject;
                }
                if !take && m >= 0 {
                    return Step::Reject;
                }

                match self.knobs.retire(state, slot, v, level == 1) {
                    Verdict::Reject => return Step::Reject,
                    Verdict::Accept => return Step::Accept,
                    Verdict::Continue => {}
                }

                i += 1;
                if i == self.n {
                    return self.knobs.finish(state);
                }
                mate::relabel(&mut state.mate);
                Step::To(self.n - i)
            }
            Item::Edge { v1, v2, i1, i2, .. } => {
                if take {
                    if let Verdict::Reject = self.knobs.take_edge(state, i1, i2, v1, v2) {
                        return Step::Reject;
                    }
                }
                i += 1;
                assert!(i != self.n, "item sequences end with a vertex item");
                Step::To(self.n - i)
            }
        }
    }
}
