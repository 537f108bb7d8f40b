//! Forced and forbidden vertex selections, for intersecting with other
//! vertex-variable specs.

use crate::hybrid::{HybridGraph, Item};
use crate::intset::IntSubset;
use crate::spec::{DdSpec, Step};

/// Requires every vertex in `select` to be taken and every vertex in
/// `non_select` to be left out. Edge items are unconstrained.
pub struct VertexChoiceHv<'a> {
    graph: &'a HybridGraph,
    n: usize,
    select: IntSubset,
    non_select: IntSubset,
}

impl<'a> VertexChoiceHv<'a> {
    pub fn new(graph: &'a HybridGraph, select: IntSubset, non_select: IntSubset) -> Self {
        Self {
            graph,
            n: graph.num_items(),
            select,
            non_select,
        }
    }
}

impl DdSpec for VertexChoiceHv<'_> {
    type State = ();

    fn root(&self) -> (Step, Self::State) {
        (Step::To(self.n), ())
    }

    fn child(&self, _state: &mut Self::State, level: usize, take: bool) -> Step {
        assert!(1 <= level && level <= self.n);

        let mut i = self.n - level;
        if let Item::Vertex { v, .. } = *self.graph.item_af(i) {
            if !take && self.select.contains(v as i32) {
                return Step::Reject;
            }
            if take && self.non_select.contains(v as i32) {
                return Step::Reject;
            }
        }

        i += 1;
        if i == self.n {
            return Step::Accept;
        }
        Step::To(self.n - i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::graph::Ordering;

    #[test]
    fn test_forced_and_forbidden() {
        let mut g = HybridGraph::new(3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.set_order(Ordering::AsIs).unwrap();

        // 5 items; v0 forced in, v2 forced out, the other three free.
        let spec = VertexChoiceHv::new(&g, IntSubset::from(vec![0]), IntSubset::from(vec![2]));
        let mut dd = build(&spec);
        dd.zdd_reduce();
        assert_eq!(dd.cardinality().to_string(), "8");
    }
}
