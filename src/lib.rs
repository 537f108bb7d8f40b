//! # frontier-zdd: frontier-based ZDD construction for graph subset families
//!
//! This crate enumerates, compactly, large families of edge (or vertex+edge)
//! subsets of an undirected graph — simple s–t paths, cycles, spanning
//! forests and trees, Steiner variants, vertex-induced subgraphs, vertex
//! cuts, degree-constrained subgraphs and plain power sets — by building a
//! Zero-suppressed Binary Decision Diagram over an item sequence derived from
//! the graph.
//!
//! ## How it works
//!
//! 1. [`graph`] linearizes the edge multiset with one of four orderings and
//!    assigns every vertex a *mate slot* for the span of the order in which
//!    it stays on the frontier.
//! 2. [`hybrid`] optionally interleaves vertex decisions with the edge
//!    decisions, producing a flat item sequence.
//! 3. A specification from [`spec`] — a small state machine over the mate
//!    slots — declares, per item and branch, whether the partial selection
//!    can continue, is dead, or is complete.
//! 4. The [`builder`] explores the spec level by level, hash-merging
//!    canonical states, and [`structure`] reduces the result into canonical
//!    ZDD form.
//! 5. [`count`], [`paths`], [`dot`] and [`io`] answer queries on the reduced
//!    diagram: big-integer cardinality, member-set enumeration, Graphviz and
//!    Sapporo/matrix dumps.
//!
//! ## Quick Start
//!
//! ```rust
//! use frontier_zdd::family::GraphFamilies;
//! use frontier_zdd::graph::Ordering;
//! use frontier_zdd::hybrid::HybridGraph;
//!
//! // The 4-cycle.
//! let mut graph = HybridGraph::new(4);
//! for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
//!     graph.add_edge(u, v).unwrap();
//! }
//! graph.set_order(Ordering::Bfs).unwrap();
//!
//! let families = GraphFamilies::new(graph);
//! assert_eq!(families.cycle(false).cardinality(), "1");
//! assert_eq!(families.st_path(Some((0, 2)), false).cardinality(), "2");
//! ```
//!
//! The lower-level interface is a [`spec::DdSpec`] passed to
//! [`builder::build`], which returns the unreduced [`structure::DdStructure`];
//! call `zdd_reduce` on it before querying.

pub mod builder;
pub mod count;
pub mod dot;
pub mod error;
pub mod family;
pub mod graph;
pub mod hybrid;
pub mod intset;
pub mod io;
pub mod node;
pub mod paths;
pub mod spec;
pub mod structure;

pub use error::{Error, Result};
pub use family::{Enumeration, GraphFamilies};
pub use graph::{Graph, Ordering};
pub use hybrid::HybridGraph;
pub use intset::IntSubset;
pub use node::{Node, NodeRef};
pub use spec::{DdSpec, Mode, Step};
pub use structure::DdStructure;
