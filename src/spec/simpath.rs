//! Simple s–t paths and simple cycles.
//!
//! Each frontier slot holds a `PathMate { s, t }` record describing the
//! partial path through that slot: `s` is the vertex the slot was opened for
//! and `t` the far endpoint of its partial path. `INTER` in `t` marks a
//! vertex that has become interior (degree 2 on the path) and may take no
//! further edge; a record with `s == t` is an untouched vertex.

use crate::graph::Graph;
use crate::hybrid::{HybridGraph, Item};
use crate::spec::{DdSpec, Step};

const INTER: i16 = -123;
/// Sentinel endpoint in cycle mode; never equals a vertex or `INTER`.
const NONE: i16 = -1;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PathMate {
    s: i16,
    t: i16,
}

impl PathMate {
    fn fresh(v: i16) -> Self {
        Self { s: v, t: v }
    }

    fn blank() -> Self {
        Self { s: INTER, t: INTER }
    }

    fn set_inter(&mut self) {
        self.t = INTER;
    }

    fn set_terminal(&mut self, u: i16) {
        self.t = u;
    }

    /// Untouched by any taken edge.
    fn is_outer(self) -> bool {
        self.s == self.t
    }

    fn terminal_is(self, u: i16) -> bool {
        self.t == u
    }

    fn is_inter(self) -> bool {
        self.t == INTER
    }

    /// Dangling endpoint of a nontrivial partial path.
    fn is_terminal(self) -> bool {
        !self.is_inter() && self.t != self.s
    }
}

fn path_complete(mate: &[PathMate], i1: usize, i2: usize) -> bool {
    mate.iter()
        .enumerate()
        .all(|(i, m)| i == i1 || i == i2 || !m.is_terminal())
}

fn cycle_complete(mate: &[PathMate]) -> bool {
    mate.iter().all(|m| !m.is_terminal())
}

/// Edge-variable simple-path / cycle spec.
pub struct Simpath<'a> {
    graph: &'a Graph,
    n: usize,
    mate_size: usize,
    s: i16,
    t: i16,
    cycle: bool,
}

impl<'a> Simpath<'a> {
    /// Enumerates simple paths between `s` and `t`.
    pub fn path(graph: &'a Graph, s: u32, t: u32) -> Self {
        assert!(graph.is_ordered(), "spec over an unordered graph");
        assert!(graph.num_vertices() <= i16::MAX as usize, "too many vertices");
        Self {
            graph,
            n: graph.num_edges(),
            mate_size: graph.max_frontier_size(),
            s: s as i16,
            t: t as i16,
            cycle: false,
        }
    }

    /// Enumerates simple cycles.
    pub fn cycle(graph: &'a Graph) -> Self {
        assert!(graph.is_ordered(), "spec over an unordered graph");
        assert!(graph.num_vertices() <= i16::MAX as usize, "too many vertices");
        Self {
            graph,
            n: graph.num_edges(),
            mate_size: graph.max_frontier_size(),
            s: NONE,
            t: NONE,
            cycle: true,
        }
    }

    /// Applies one taken edge to the mate array; `Some` means the branch is
    /// decided.
    fn take_edge(&self, mate: &mut [PathMate], i1: usize, i2: usize, v1: i16, v2: i16, first: bool) -> Option<Step> {
        let (m1, m2) = (mate[i1], mate[i2]);

        // Interior vertices accept no further edge.
        if m1.is_inter() || m2.is_inter() {
            return Some(Step::Reject);
        }

        // A path may not close on itself.
        if !self.cycle && m1.terminal_is(v2) {
            return Some(Step::Reject);
        }

        if !self.cycle
            && ((m1.terminal_is(self.s) && m2.terminal_is(self.t))
                || (m1.terminal_is(self.t) && m2.terminal_is(self.s)))
        {
            // The s-t path closes; nothing else may dangle.
            return if first || path_complete(mate, i1, i2) {
                Some(Step::Accept)
            } else {
                Some(Step::Reject)
            };
        }

        // Splice: the far ends of the two partial paths now point at each
        // other.
        if m1.t != self.s && m1.t != self.t {
            let slot = self.graph.mate_slot(m1.t as u32);
            mate[slot].set_terminal(m2.t);
        }
        if m2.t != self.s && m2.t != self.t {
            let slot = self.graph.mate_slot(m2.t as u32);
            mate[slot].set_terminal(m1.t);
        }

        if v1 == self.s || v1 == self.t {
            mate[i1].set_inter();
        }
        if v2 == self.s || v2 == self.t {
            mate[i2].set_inter();
        }
        if !m1.terminal_is(v1) {
            mate[i1].set_inter();
        }
        if !m2.terminal_is(v2) {
            mate[i2].set_inter();
        }

        if self.cycle && m1.t == m2.s && m1.s == m2.t {
            return if cycle_complete(mate) {
                Some(Step::Accept)
            } else {
                Some(Step::Reject)
            };
        }

        None
    }

    /// Frontier-exit check for one endpoint; true means reject.
    fn bad_exit(&self, m: PathMate) -> bool {
        m.is_terminal() || m.terminal_is(self.s) || m.terminal_is(self.t)
    }
}

impl DdSpec for Simpath<'_> {
    type State = Vec<PathMate>;

    fn root(&self) -> (Step, Self::State) {
        (Step::To(self.n), vec![PathMate::blank(); self.mate_size])
    }

    fn child(&self, mate: &mut Self::State, level: usize, take: bool) -> Step {
        let mut i = self.n - level;
        let edge = self.graph.edge(i);

        if edge.in1 {
            mate[edge.i1] = PathMate::fresh(edge.v1 as i16);
        }
        if edge.in2 {
            mate[edge.i2] = PathMate::fresh(edge.v2 as i16);
        }

        if take {
            if let Some(decided) = self.take_edge(mate, edge.i1, edge.i2, edge.v1 as i16, edge.v2 as i16, i == 0) {
                return decided;
            }
        }

        if edge.out1 {
            if self.bad_exit(mate[edge.i1]) {
                return Step::Reject;
            }
            mate[edge.i1] = PathMate::blank();
        }
        if edge.out2 {
            if self.bad_exit(mate[edge.i2]) {
                return Step::Reject;
            }
            mate[edge.i2] = PathMate::blank();
        }

        i += 1;
        if i == self.n {
            return Step::Reject;
        }
        Step::To(self.n - i)
    }
}

/// Vertex+edge-variable simple-path / cycle spec. A vertex item must be taken
/// iff the vertex lies on the path; once the path closes, the spec
/// fast-forwards across edge items and only vertex decisions remain.
pub struct SimpathHv<'a> {
    graph: &'a HybridGraph,
    n: usize,
    mate_size: usize,
    s: i16,
    t: i16,
    cycle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpathHvState {
    complete: bool,
    mate: Vec<PathMate>,
}

impl<'a> SimpathHv<'a> {
    pub fn path(graph: &'a HybridGraph, s: u32, t: u32) -> Self {
        assert!(graph.num_vertices() <= i16::MAX as usize, "too many vertices");
        Self {
            graph,
            n: graph.num_items(),
            mate_size: graph.max_frontier_size(),
            s: s as i16,
            t: t as i16,
            cycle: false,
        }
    }

    pub fn cycle(graph: &'a HybridGraph) -> Self {
        assert!(graph.num_vertices() <= i16::MAX as usize, "too many vertices");
        Self {
            graph,
            n: graph.num_items(),
            mate_size: graph.max_frontier_size(),
            s: NONE,
            t: NONE,
            cycle: true,
        }
    }
}

impl DdSpec for SimpathHv<'_> {
    type State = SimpathHvState;

    fn root(&self) -> (Step, Self::State) {
        let state = SimpathHvState {
            complete: false,
            mate: vec![PathMate::blank(); self.mate_size],
        };
        (Step::To(self.n), state)
    }

    fn child(&self, state: &mut Self::State, level: usize, take: bool) -> Step {
        let mut i = self.n - level;

        match *self.graph.item_af(i) {
            Item::Vertex { slot, .. } => {
                let m = state.mate[slot];
                if take && m.is_outer() {
                    return Step::Reject;
                }
                if !take && !m.is_outer() {
                    return Step::Reject;
                }
                state.mate[slot] = PathMate::blank();
            }
            Item::Edge { v1, v2, i1, i2, in1, in2, out1, out2 } => {
                if in1 {
                    state.mate[i1] = PathMate::fresh(v1 as i16);
                }
                if in2 {
                    state.mate[i2] = PathMate::fresh(v2 as i16);
                }

                if take {
                    let (m1, m2) = (state.mate[i1], state.mate[i2]);
                    let (v1, v2) = (v1 as i16, v2 as i16);

                    if m1.is_inter() || m2.is_inter() {
                        return Step::Reject;
                    }
                    if !self.cycle && m1.terminal_is(v2) {
                        return Step::Reject;
                    }

                    if !self.cycle
                        && ((m1.terminal_is(self.s) && m2.terminal_is(self.t))
                            || (m1.terminal_is(self.t) && m2.terminal_is(self.s)))
                    {
                        if i == 0 || path_complete(&state.mate, i1, i2) {
                            state.complete = true;
                        } else {
                            return Step::Reject;
                        }
                    }

                    if m1.t != self.s && m1.t != self.t {
                        let slot = self.graph.mate_slot(m1.t as u32);
                        state.mate[slot].set_terminal(m2.t);
                    }
                    if m2.t != self.s && m2.t != self.t {
                        let slot = self.graph.mate_slot(m2.t as u32);
                        state.mate[slot].set_terminal(m1.t);
                    }

                    if v1 == self.s || v1 == self.t {
                        state.mate[i1].set_inter();
                    }
                    if v2 == self.s || v2 == self.t {
                        state.mate[i2].set_inter();
                    }
                    if !m1.terminal_is(v1) {
                        state.mate[i1].set_inter();
                    }
                    if !m2.terminal_is(v2) {
                        state.mate[i2].set_inter();
                    }

                    if self.cycle && m1.t == m2.s && m1.s == m2.t {
                        if cycle_complete(&state.mate) {
                            state.complete = true;
                        } else {
                            return Step::Reject;
                        }
                    }
                }

                if out1 {
                    let m = state.mate[i1];
                    if m.is_terminal() || m.terminal_is(self.s) || m.terminal_is(self.t) {
                        return Step::Reject;
                    }
                }
                if out2 {
                    let m = state.mate[i2];
                    if m.is_terminal() || m.terminal_is(self.s) || m.terminal_is(self.t) {
                        return Step::Reject;
                    }
                }
            }
        }

        i += 1;
        if i == self.n {
            return if state.complete { Step::Accept } else { Step::Reject };
        }

        if state.complete {
            // Remaining edges are zero-forced; stop only at vertex decisions.
            while !self.graph.item_af(i).is_vertex() {
                i += 1;
                assert!(i != self.n, "item sequences end with a vertex item");
            }
        }

        Step::To(self.n - i)
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
    fn test_path_graph_single_path() {
        let mut g = Graph::new(5);
        for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 4)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();

        let spec = Simpath::path(&g, 0, 4);
        let mut dd = build(&spec);
        dd.zdd_reduce();
        assert_eq!(dd.cardinality().to_string(), "1");
        // Every edge is forced; one decision node per variable.
        assert_eq!(dd.size(), 4);
    }

    #[test]
    fn test_triangle_single_cycle() {
        let mut g = Graph::new(3);
        for (u, v) in [(0, 1), (1, 2), (0, 2)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();

        assert_eq!(reduced_count(&Simpath::cycle(&g)), "1");
    }

    #[test]
    fn test_k4_five_st_paths() {
        let mut g = Graph::new(4);
        for (u, v) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();

        assert_eq!(reduced_count(&Simpath::path(&g, 0, 3)), "5");
    }

    #[test]
    fn test_k4_cycles() {
        let mut g = Graph::new(4);
        for (u, v) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();

        // Four triangles and three 4-cycles.
        assert_eq!(reduced_count(&Simpath::cycle(&g)), "7");
    }

    #[test]
    fn test_hybrid_path_agrees_with_edge_var() {
        let mut g = HybridGraph::new(4);
        for (u, v) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();

        assert_eq!(reduced_count(&SimpathHv::path(&g, 0, 3)), "5");
        assert_eq!(reduced_count(&SimpathHv::cycle(&g)), "7");
    }

    #[test]
    fn test_no_path_between_disconnected_vertices() {
        let mut g = Graph::new(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(2, 3).unwrap();
        g.set_order(Ordering::AsIs).unwrap();

        assert_eq!(reduced_count(&Simpath::path(&g, 0, 3)), "0");
    }
}
