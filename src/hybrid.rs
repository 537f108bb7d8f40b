//! Item sequences interleaving vertex decisions with edge decisions.
//!
//! `HybridGraph` wraps an ordered [`Graph`] and flattens it into two item
//! sequences of length `V + E`:
//!
//! - the **after** sequence places each vertex item immediately after the last
//!   edge touching it, so a spec can commit the vertex-level decision once the
//!   edge-level picture around it is final;
//! - the **before** sequence places each vertex item just before the first
//!   edge touching it, for forward constraints.
//!
//! Vertices on no edge at all are appended at the end of both sequences with
//! slot 0 and an empty frontier snapshot.

use std::collections::BTreeSet;
use std::ops::Deref;

use crate::graph::{AddInfo, Graph, Ordering};
use crate::error::Result;

/// One element of the linearized sequence: an edge decision or a vertex
/// decision. Edge items carry the same metadata as [`crate::graph::Edge`];
/// vertex items carry the vertex and its mate slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Edge {
        v1: u32,
        v2: u32,
        i1: usize,
        i2: usize,
        in1: bool,
        in2: bool,
        out1: bool,
        out2: bool,
    },
    Vertex {
        v: u32,
        slot: usize,
    },
}

impl Item {
    pub fn is_vertex(&self) -> bool {
        matches!(self, Item::Vertex { .. })
    }
}

/// [`AddInfo`] extended with `adj`: for a vertex item, the frontier vertices
/// adjacent to it at that point.
#[derive(Debug, Default, Clone)]
pub struct AddInfoHv {
    pub rm1: usize,
    pub rm2: usize,
    pub adj1: Vec<u32>,
    pub adj2: Vec<u32>,
    pub frontier: Vec<u32>,
    pub adj: Vec<u32>,
}

impl From<&AddInfo> for AddInfoHv {
    fn from(a: &AddInfo) -> Self {
        Self {
            rm1: a.rm1,
            rm2: a.rm2,
            adj1: a.adj1.clone(),
            adj2: a.adj2.clone(),
            frontier: a.frontier.clone(),
            adj: Vec::new(),
        }
    }
}

pub struct HybridGraph {
    graph: Graph,
    items_set: bool,

    items_bf: Vec<Item>,
    items_af: Vec<Item>,
    add_info_bf: Vec<AddInfoHv>,
    add_info_af: Vec<AddInfoHv>,
}

impl HybridGraph {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            graph: Graph::new(num_vertices),
            items_set: false,
            items_bf: Vec::new(),
            items_af: Vec::new(),
            add_info_bf: Vec::new(),
            add_info_af: Vec::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn add_edge(&mut self, v1: u32, v2: u32) -> Result<()> {
        self.items_set = false;
        self.graph.add_edge(v1, v2)
    }

    /// Re-fixes the edge order and rebuilds both item sequences.
    pub fn set_order(&mut self, ordering: Ordering) -> Result<()> {
        self.items_set = false;
        self.graph.set_order(ordering)?;
        self.set_items();
        Ok(())
    }

    pub fn num_items(&self) -> usize {
        assert!(self.items_set, "num_items() before set_order");
        self.items_af.len()
    }

    pub fn item_af(&self, i: usize) -> &Item {
        assert!(self.items_set, "item_af() before set_order");
        &self.items_af[i]
    }

    pub fn item_bf(&self, i: usize) -> &Item {
        assert!(self.items_set, "item_bf() before set_order");
        &self.items_bf[i]
    }

    pub fn add_info_af(&self, i: usize) -> &AddInfoHv {
        assert!(self.items_set, "add_info_af() before set_order");
        &self.add_info_af[i]
    }

    pub fn add_info_bf(&self, i: usize) -> &AddInfoHv {
        assert!(self.items_set, "add_info_bf() before set_order");
        &self.add_info_bf[i]
    }

    fn vertex_info(&self, v: u32, frontier: &BTreeSet<u32>) -> AddInfoHv {
        AddInfoHv {
            frontier: frontier.iter().copied().collect(),
            adj: frontier.iter().copied().filter(|&u| self.graph.is_adj(v, u)).collect(),
            ..AddInfoHv::default()
        }
    }

    fn set_items(&mut self) {
        assert!(self.graph.is_ordered(), "set_items before set_order");

        self.items_bf.clear();
        self.items_af.clear();
        self.add_info_bf.clear();
        self.add_info_af.clear();

        let num_v = self.graph.num_vertices();
        let num_e = self.graph.num_edges();
        let mut on_edge = vec![false; num_v];
        let mut frontier: BTreeSet<u32> = BTreeSet::new();

        for i in 0..num_e {
            let e = self.graph.edge(i).clone();
            on_edge[e.v1 as usize] = true;
            on_edge[e.v2 as usize] = true;

            // "before": entering vertices precede their first edge. The
            // frontier snapshot predates the endpoints' insertion.
            if e.in1 {
                let info = self.vertex_info(e.v1, &frontier);
                self.items_bf.push(Item::Vertex { v: e.v1, slot: e.i1 });
                self.add_info_bf.push(info);
            }
            if e.in2 {
                let info = self.vertex_info(e.v2, &frontier);
                self.items_bf.push(Item::Vertex { v: e.v2, slot: e.i2 });
                self.add_info_bf.push(info);
            }

            frontier.insert(e.v1);
            frontier.insert(e.v2);

            let edge_item = Item::Edge {
                v1: e.v1,
                v2: e.v2,
                i1: e.i1,
                i2: e.i2,
                in1: e.in1,
                in2: e.in2,
                out1: e.out1,
                out2: e.out2,
            };
            let edge_info = AddInfoHv::from(self.graph.add_info(i));

            self.items_bf.push(edge_item.clone());
            self.add_info_bf.push(edge_info.clone());

            self.items_af.push(edge_item);
            self.add_info_af.push(edge_info);

            // "after": leaving vertices follow their last edge. The frontier
            // snapshot still contains the vertex; its adjacency is taken over
            // the remaining frontier.
            if e.out1 {
                let snapshot: Vec<u32> = frontier.iter().copied().collect();
                frontier.remove(&e.v1);
                let mut info = self.vertex_info(e.v1, &frontier);
                info.frontier = snapshot;
                self.items_af.push(Item::Vertex { v: e.v1, slot: e.i1 });
                self.add_info_af.push(info);
            }
            if e.out2 {
                let snapshot: Vec<u32> = frontier.iter().copied().collect();
                frontier.remove(&e.v2);
                let mut info = self.vertex_info(e.v2, &frontier);
                info.frontier = snapshot;
                self.items_af.push(Item::Vertex { v: e.v2, slot: e.i2 });
                self.add_info_af.push(info);
            }
        }

        for v in 0..num_v as u32 {
            if !on_edge[v as usize] {
                let item = Item::Vertex { v, slot: 0 };
                self.items_af.push(item.clone());
                self.add_info_af.push(AddInfoHv::default());
                self.items_bf.push(item);
                self.add_info_bf.push(AddInfoHv::default());
            }
        }

        assert_eq!(self.items_af.len(), num_v + num_e);
        assert_eq!(self.items_bf.len(), num_v + num_e);
        self.items_set = true;
    }
}

// Read-only graph queries pass through.
impl Deref for HybridGraph {
    type Target = Graph;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path3() -> HybridGraph {
        let mut g = HybridGraph::new(3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.set_order(Ordering::AsIs).unwrap();
        g
    }

    #[test]
    fn test_item_count() {
        let g = path3();
        assert_eq!(g.num_items(), 3 + 2);
    }

    #[test]
    fn test_after_sequence_shape() {
        let g = path3();
        // (0,1); v0 out; (1,2); v1 out; v2 out.
        assert!(!g.item_af(0).is_vertex());
        assert_eq!(g.item_af(1), &Item::Vertex { v: 0, slot: 0 });
        assert!(!g.item_af(2).is_vertex());
        assert_eq!(g.item_af(3), &Item::Vertex { v: 1, slot: 1 });
        assert!(matches!(g.item_af(4), Item::Vertex { v: 2, .. }));
    }

    #[test]
    fn test_before_sequence_shape() {
        let g = path3();
        // v0; v1; (0,1); v2; (1,2).
        assert_eq!(g.item_bf(0), &Item::Vertex { v: 0, slot: 0 });
        assert_eq!(g.item_bf(1), &Item::Vertex { v: 1, slot: 1 });
        assert!(!g.item_bf(2).is_vertex());
        assert!(matches!(g.item_bf(3), Item::Vertex { v: 2, .. }));
        assert!(!g.item_bf(4).is_vertex());
    }

    #[test]
    fn test_isolated_vertex_appended() {
        let mut g = HybridGraph::new(3);
        g.add_edge(0, 1).unwrap();
        g.set_order(Ordering::AsIs).unwrap();
        assert_eq!(g.num_items(), 4);
        assert_eq!(g.item_af(3), &Item::Vertex { v: 2, slot: 0 });
    }

    #[test]
    fn test_vertex_item_adjacency() {
        let mut g = HybridGraph::new(3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(0, 2).unwrap();
        g.set_order(Ordering::AsIs).unwrap();

        // After (1,2), vertex 1 leaves; 0 and 2 remain on the frontier and
        // both are its neighbors, but the vertex item's own adjacency is over
        // the frontier without it.
        let out_v1 = (0..g.num_items())
            .find(|&i| matches!(g.item_af(i), Item::Vertex { v: 1, .. }))
            .unwrap();
        let info = g.add_info_af(out_v1);
        assert_eq!(info.frontier, vec![0, 1, 2]);
        assert_eq!(info.adj, vec![0, 2]);
    }
}
