//! One-call enumeration facade.
//!
//! `GraphFamilies` owns an ordered [`HybridGraph`] and exposes each supported
//! family as a single method; every call builds the spec, runs the builder,
//! reduces in place and hands back an [`Enumeration`] with the reduced
//! diagram plus the unreduced size for diagnostics.

use std::path::Path;

use log::info;

use crate::builder::build;
use crate::error::Result;
use crate::graph::Ordering;
use crate::hybrid::HybridGraph;
use crate::intset::IntSubset;
use crate::io::read_graph_file;
use crate::spec::components::{Components, ComponentsHv};
use crate::spec::cut::VertexCutHv;
use crate::spec::induced::{Induced, InducedHv};
use crate::spec::power::{Power, PowerHv};
use crate::spec::simpath::{Simpath, SimpathHv};
use crate::spec::{DdSpec, Mode};
use crate::structure::DdStructure;

/// Outcome of one enumeration: the reduced diagram plus a few diagnostics.
pub struct Enumeration {
    kind: String,
    unreduced_size: usize,
    dd: DdStructure,
}

impl Enumeration {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn unreduced_size(&self) -> usize {
        self.unreduced_size
    }

    pub fn reduced_size(&self) -> usize {
        self.dd.size()
    }

    /// Decimal cardinality of the family.
    pub fn cardinality(&self) -> String {
        self.dd.cardinality().to_string()
    }

    pub fn dd(&self) -> &DdStructure {
        &self.dd
    }

    pub fn into_dd(self) -> DdStructure {
        self.dd
    }
}

pub struct GraphFamilies {
    graph: HybridGraph,
}

impl GraphFamilies {
    /// Wraps an already ordered graph.
    pub fn new(graph: HybridGraph) -> Self {
        assert!(graph.is_ordered(), "order the graph before enumerating");
        Self { graph }
    }

    /// Loads a graph file and fixes the given ordering.
    pub fn from_file<P: AsRef<Path>>(path: P, ordering: Ordering) -> Result<Self> {
        let mut graph = read_graph_file(path)?;
        graph.set_order(ordering)?;
        Ok(Self { graph })
    }

    /// Re-fixes the ordering; diagrams built earlier keep their old variable
    /// numbering.
    pub fn reorder(&mut self, ordering: Ordering) -> Result<()> {
        self.graph.set_order(ordering)
    }

    pub fn graph(&self) -> &HybridGraph {
        &self.graph
    }

    fn run<S: DdSpec>(&self, kind: &str, spec: &S) -> Enumeration {
        let mut dd = build(spec);
        let unreduced_size = dd.size();
        dd.zdd_reduce();
        info!(
            "{}: {} nodes unreduced, {} reduced",
            kind,
            unreduced_size,
            dd.size()
        );
        Enumeration {
            kind: kind.to_string(),
            unreduced_size,
            dd,
        }
    }

    /// All subsets; with `vertex_var`, vertex items follow edge incidence.
    pub fn power(&self, vertex_var: bool) -> Enumeration {
        if vertex_var {
            self.run("power set", &PowerHv::new(&self.graph))
        } else {
            self.run("power set", &Power::new(self.graph.num_edges()))
        }
    }

    /// Simple paths between `s` and `t` (defaults to `0` and `V-1`).
    pub fn st_path(&self, st: Option<(u32, u32)>, vertex_var: bool) -> Enumeration {
        let (s, t) = st.unwrap_or((0, self.graph.num_vertices() as u32 - 1));
        let kind = format!("{}-{} path", s, t);
        if vertex_var {
            self.run(&kind, &SimpathHv::path(&self.graph, s, t))
        } else {
            self.run(&kind, &Simpath::path(&self.graph, s, t))
        }
    }

    /// Simple cycles.
    pub fn cycle(&self, vertex_var: bool) -> Enumeration {
        if vertex_var {
            self.run("cycle", &SimpathHv::cycle(&self.graph))
        } else {
            self.run("cycle", &Simpath::cycle(&self.graph))
        }
    }

    /// Spanning connected subgraphs.
    pub fn connected(&self, cc_constraint: IntSubset, vertex_var: bool) -> Enumeration {
        if vertex_var {
            self.run(
                "connected",
                &ComponentsHv::new(&self.graph, Mode::Connected, cc_constraint, IntSubset::new()),
            )
        } else {
            self.run(
                "connected",
                &Components::new(&self.graph, Mode::Connected, cc_constraint, IntSubset::new()),
            )
        }
    }

    /// Spanning forests; Steiner forests when terminals are given.
    pub fn forest(&self, cc_constraint: IntSubset, terminals: IntSubset, vertex_var: bool) -> Enumeration {
        let kind = if terminals.is_empty() { "forest" } else { "steiner forest" };
        if vertex_var {
            self.run(
                kind,
                &ComponentsHv::new(&self.graph, Mode::Forest, cc_constraint, terminals),
            )
        } else {
            self.run(
                kind,
                &Components::new(&self.graph, Mode::Forest, cc_constraint, terminals),
            )
        }
    }

    /// Spanning trees; Steiner trees when terminals are given.
    pub fn tree(&self, terminals: IntSubset, vertex_var: bool) -> Enumeration {
        let kind = if terminals.is_empty() { "tree" } else { "steiner tree" };
        if vertex_var {
            self.run(
                kind,
                &ComponentsHv::new(&self.graph, Mode::Tree, IntSubset::new(), terminals),
            )
        } else {
            self.run(
                kind,
                &Components::new(&self.graph, Mode::Tree, IntSubset::new(), terminals),
            )
        }
    }

    /// Vertex-induced subgraphs.
    pub fn induced(&self, no_isolate: bool, vertex_var: bool) -> Enumeration {
        if vertex_var {
            self.run(
                "induced graphs",
                &InducedHv::new(&self.graph, Mode::Normal, no_isolate, IntSubset::new()),
            )
        } else {
            self.run(
                "induced graphs",
                &Induced::new(&self.graph, Mode::Normal, IntSubset::new()),
            )
        }
    }

    /// Connected vertex-induced subgraphs.
    pub fn induced_connected(&self, no_isolate: bool, vertex_var: bool) -> Enumeration {
        if vertex_var {
            self.run(
                "induced connected",
                &InducedHv::new(&self.graph, Mode::Connected, no_isolate, IntSubset::new()),
            )
        } else {
            self.run(
                "induced connected",
                &Induced::new(&self.graph, Mode::Connected, IntSubset::new()),
            )
        }
    }

    /// Vertex-induced forests with an optional component-count constraint.
    pub fn induced_forest(&self, no_isolate: bool, cc_constraint: IntSubset, vertex_var: bool) -> Enumeration {
        if vertex_var {
            self.run(
                "induced forest",
                &InducedHv::new(&self.graph, Mode::Forest, no_isolate, cc_constraint),
            )
        } else {
            self.run(
                "induced forest",
                &Induced::new(&self.graph, Mode::Forest, cc_constraint),
            )
        }
    }

    /// Vertex-induced trees.
    pub fn induced_tree(&self, no_isolate: bool, vertex_var: bool) -> Enumeration {
        if vertex_var {
            self.run(
                "induced tree",
                &InducedHv::new(&self.graph, Mode::Tree, no_isolate, IntSubset::new()),
            )
        } else {
            self.run(
                "induced tree",
                &Induced::new(&self.graph, Mode::Tree, IntSubset::new()),
            )
        }
    }

    /// Vertex cuts with an optional component-count constraint.
    pub fn vertex_cut(&self, constraint: IntSubset) -> Enumeration {
        self.run("vertex cut", &VertexCutHv::new(&self.graph, constraint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c4_families() -> GraphFamilies {
        let mut g = HybridGraph::new(4);
        for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();
        GraphFamilies::new(g)
    }

    #[test]
    fn test_power_and_cycle() {
        let fam = c4_families();
        assert_eq!(fam.power(false).cardinality(), "16");
        assert_eq!(fam.cycle(false).cardinality(), "1");
        assert_eq!(fam.cycle(true).cardinality(), "1");
    }

    #[test]
    fn test_st_path_default_endpoints() {
        let fam = c4_families();
        // 0 to 3 around either side of the square.
        assert_eq!(fam.st_path(None, false).cardinality(), "2");
        assert_eq!(fam.st_path(Some((0, 2)), false).cardinality(), "2");
    }

    #[test]
    fn test_enumeration_diagnostics() {
        let fam = c4_families();
        let e = fam.st_path(None, false);
        assert_eq!(e.kind(), "0-3 path");
        assert!(e.unreduced_size() >= e.reduced_size());
    }

    #[test]
    fn test_spanning_trees_of_c4() {
        let fam = c4_families();
        assert_eq!(fam.forest(IntSubset::from(vec![1]), IntSubset::new(), false).cardinality(), "4");
        assert_eq!(fam.connected(IntSubset::new(), false).cardinality(), "5");
    }
}
