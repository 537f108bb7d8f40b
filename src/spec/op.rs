//! Product of two specs: the intersection of their families.
//!
//! Both sides advance over the same item universe. A side whose next level
//! lies below the current one has zero-forced the items in between, so a
//! 1-branch there kills the whole product; a side that has already accepted
//! tolerates only 0-branches for the rest of the way.

use crate::spec::{DdSpec, Step};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Side<S> {
    /// Waiting at `level` with a live state.
    At(usize, S),
    /// Accepted; all remaining items are zero-forced.
    Accepted,
}

impl<S> Side<S> {
    fn level(&self) -> usize {
        match self {
            Side::At(level, _) => *level,
            Side::Accepted => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntersectionState<A, B> {
    a: Side<A>,
    b: Side<B>,
}

/// `A ∩ B` over a shared item numbering.
pub struct Intersection<'a, A, B> {
    a: &'a A,
    b: &'a B,
}

impl<'a, A: DdSpec, B: DdSpec> Intersection<'a, A, B> {
    pub fn new(a: &'a A, b: &'a B) -> Self {
        Self { a, b }
    }
}

/// Advances one side across `level`. Returns `None` on rejection.
fn advance<S: DdSpec>(spec: &S, side: Side<S::State>, level: usize, take: bool) -> Option<Side<S::State>> {
    match side {
        Side::At(at, mut state) if at == level => match spec.child(&mut state, level, take) {
            Step::Reject => None,
            Step::Accept => Some(Side::Accepted),
            Step::To(next) => {
                assert!(next < level, "child must descend");
                Some(Side::At(next, state))
            }
        },
        // Not consulted at this level: the side has zero-forced it.
        side => {
            if take {
                None
            } else {
                Some(side)
            }
        }
    }
}

impl<A: DdSpec, B: DdSpec> DdSpec for Intersection<'_, A, B> {
    type State = IntersectionState<A::State, B::State>;

    fn root(&self) -> (Step, Self::State) {
        let (step_a, state_a) = self.a.root();
        let (step_b, state_b) = self.b.root();

        let a = match step_a {
            Step::Reject => {
                return (Step::Reject, IntersectionState { a: Side::Accepted, b: Side::Accepted })
            }
            Step::Accept => Side::Accepted,
            Step::To(level) => Side::At(level, state_a),
        };
        let b = match step_b {
            Step::Reject => {
                return (Step::Reject, IntersectionState { a: Side::Accepted, b: Side::Accepted })
            }
            Step::Accept => Side::Accepted,
            Step::To(level) => Side::At(level, state_b),
        };

        let top = a.level().max(b.level());
        let state = IntersectionState { a, b };
        if top == 0 {
            (Step::Accept, state)
        } else {
            (Step::To(top), state)
        }
    }

    fn child(&self, state: &mut Self::State, level: usize, take: bool) -> Step {
        let a = std::mem::replace(&mut state.a, Side::Accepted);
        let b = std::mem::replace(&mut state.b, Side::Accepted);

        let Some(a) = advance(self.a, a, level, take) else {
            return Step::Reject;
        };
        let Some(b) = advance(self.b, b, level, take) else {
            return Step::Reject;
        };

        let next = a.level().max(b.level());
        state.a = a;
        state.b = b;

        if next == 0 {
            Step::Accept
        } else {
            Step::To(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::graph::{Graph, Ordering};
    use crate::hybrid::HybridGraph;
    use crate::intset::IntSubset;
    use crate::spec::components::Components;
    use crate::spec::counting::{ItemCount, VertexCountHv};
    use crate::spec::power::Power;
    use crate::spec::simpath::SimpathHv;
    use crate::spec::Mode;

    fn reduced_count<S: DdSpec>(spec: &S) -> String {
        let mut dd = build(spec);
        dd.zdd_reduce();
        dd.cardinality().to_string()
    }

    #[test]
    fn test_power_intersect_count() {
        // All subsets of 4 items, restricted to size 2.
        let power = Power::new(4);
        let size2 = ItemCount::new(4, vec![true; 4], IntSubset::from(vec![2]));
        let spec = Intersection::new(&power, &size2);
        assert_eq!(reduced_count(&spec), "6");
    }

    #[test]
    fn test_spanning_trees_intersect_edge_count() {
        let mut g = Graph::new(4);
        for (u, v) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();

        let trees = Components::new(&g, Mode::Forest, IntSubset::from(vec![1]), IntSubset::new());
        // A spanning tree of K4 has exactly 3 edges, so this is a no-op
        // constraint, and 2 edges can never span.
        let three = ItemCount::new(g.num_edges(), vec![true; 6], IntSubset::from(vec![3]));
        let spec = Intersection::new(&trees, &three);
        assert_eq!(reduced_count(&spec), "16");

        let two = ItemCount::new(g.num_edges(), vec![true; 6], IntSubset::from(vec![2]));
        let spec = Intersection::new(&trees, &two);
        assert_eq!(reduced_count(&spec), "0");
    }

    #[test]
    fn test_paths_through_few_vertices() {
        let mut g = HybridGraph::new(4);
        for (u, v) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();

        // 0-3 paths using at most 2 vertices: only the direct edge.
        let paths = SimpathHv::path(&g, 0, 3);
        let short = VertexCountHv::new(&g, IntSubset::from(vec![0, 1, 2]));
        let spec = Intersection::new(&paths, &short);
        assert_eq!(reduced_count(&spec), "1");
    }
}
