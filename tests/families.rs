//! End-to-end checks over whole families: the canonical small-graph
//! scenarios plus the cross-cutting invariants (determinism, ordering
//! independence, reduction idempotence, dump round-trips).

use std::io::Cursor;

use frontier_zdd::builder::build;
use frontier_zdd::spec::components::Components;
use frontier_zdd::spec::import::ImportedZdd;
use frontier_zdd::spec::induced::Induced;
use frontier_zdd::spec::power::Power;
use frontier_zdd::spec::simpath::Simpath;
use frontier_zdd::{DdSpec, DdStructure, Graph, GraphFamilies, HybridGraph, IntSubset, Mode, Ordering};

const ORDERINGS: [Ordering; 4] = [Ordering::AsIs, Ordering::Dfs, Ordering::Bfs, Ordering::Greedy];

fn graph(v: usize, edges: &[(u32, u32)], ordering: Ordering) -> Graph {
    let mut g = Graph::new(v);
    for &(a, b) in edges {
        g.add_edge(a, b).unwrap();
    }
    g.set_order(ordering).unwrap();
    g
}

fn hybrid(v: usize, edges: &[(u32, u32)], ordering: Ordering) -> HybridGraph {
    let mut g = HybridGraph::new(v);
    for &(a, b) in edges {
        g.add_edge(a, b).unwrap();
    }
    g.set_order(ordering).unwrap();
    g
}

fn reduced<S: DdSpec>(spec: &S) -> DdStructure {
    let mut dd = build(spec);
    dd.zdd_reduce();
    dd
}

const PATH5: [(u32, u32); 4] = [(0, 1), (1, 2), (2, 3), (3, 4)];
const TRIANGLE: [(u32, u32); 3] = [(0, 1), (1, 2), (0, 2)];
const K4: [(u32, u32); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
const C4: [(u32, u32); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];
const SPLIT: [(u32, u32); 2] = [(0, 1), (2, 3)];

// Scenario A: the path graph has exactly one 0-4 path, with every edge
// variable forced to 1.
#[test]
fn scenario_path_graph_single_st_path() {
    let g = graph(5, &PATH5, Ordering::AsIs);
    let dd = reduced(&Simpath::path(&g, 0, 4));
    assert_eq!(dd.cardinality().to_string(), "1");
    assert_eq!(dd.size(), 4);

    let sets: Vec<_> = dd.sets().collect();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].len(), 4);
}

// Scenario B: the triangle carries a single cycle.
#[test]
fn scenario_triangle_cycle() {
    let g = graph(3, &TRIANGLE, Ordering::AsIs);
    let dd = reduced(&Simpath::cycle(&g));
    assert_eq!(dd.cardinality().to_string(), "1");
}

// Scenario C: spanning trees of K4 (forest spec with one component).
#[test]
fn scenario_k4_spanning_trees() {
    let g = graph(4, &K4, Ordering::AsIs);
    let dd = reduced(&Components::new(&g, Mode::Forest, IntSubset::from(vec![1]), IntSubset::new()));
    assert_eq!(dd.cardinality().to_string(), "16");
}

// Scenario D: five simple 0-3 paths in K4.
#[test]
fn scenario_k4_st_paths() {
    let g = graph(4, &K4, Ordering::AsIs);
    let dd = reduced(&Simpath::path(&g, 0, 3));
    assert_eq!(dd.cardinality().to_string(), "5");
}

// Scenario E: connected induced subgraphs of the 4-cycle by edge set — four
// single edges, four 2-edge paths, the whole cycle.
#[test]
fn scenario_c4_connected_induced() {
    let g = graph(4, &C4, Ordering::AsIs);
    let dd = reduced(&Induced::new(&g, Mode::Connected, IntSubset::new()));
    assert_eq!(dd.cardinality().to_string(), "9");
}

// Scenario F: two disconnected edges admit no spanning connected subgraph.
#[test]
fn scenario_split_graph_not_connectable() {
    let g = graph(4, &SPLIT, Ordering::AsIs);
    let dd = reduced(&Components::new(&g, Mode::Connected, IntSubset::new(), IntSubset::new()));
    assert_eq!(dd.cardinality().to_string(), "0");
}

// Invariant 1: identical inputs give identical reduced diagrams.
#[test]
fn invariant_determinism() {
    let g = graph(4, &K4, Ordering::Greedy);
    let a = reduced(&Simpath::path(&g, 0, 3));
    let b = reduced(&Simpath::path(&g, 0, 3));

    assert_eq!(a.root(), b.root());
    assert_eq!(a.size(), b.size());
    for level in 1..=a.top_level() {
        for (x, y) in a.level_nodes(level).iter().zip(b.level_nodes(level)) {
            assert_eq!(x, y);
        }
    }
}

// Invariant 2: cardinality does not depend on the ordering.
#[test]
fn invariant_ordering_independence() {
    for ordering in ORDERINGS {
        let g = graph(4, &K4, ordering);
        assert_eq!(
            reduced(&Simpath::path(&g, 0, 3)).cardinality().to_string(),
            "5",
            "{:?}",
            ordering
        );
        assert_eq!(
            reduced(&Simpath::cycle(&g)).cardinality().to_string(),
            "7",
            "{:?}",
            ordering
        );
        assert_eq!(
            reduced(&Components::new(&g, Mode::Forest, IntSubset::from(vec![1]), IntSubset::new()))
                .cardinality()
                .to_string(),
            "16",
            "{:?}",
            ordering
        );

        let h = hybrid(4, &C4, ordering);
        let fam = GraphFamilies::new(h);
        assert_eq!(fam.cycle(true).cardinality(), "1", "{:?}", ordering);
        assert_eq!(fam.power(false).cardinality(), "16", "{:?}", ordering);
    }
}

// Invariant 3: reduction is idempotent.
#[test]
fn invariant_reduce_idempotent() {
    let g = graph(4, &K4, Ordering::Bfs);
    let mut dd = build(&Components::new(&g, Mode::Forest, IntSubset::new(), IntSubset::new()));
    dd.zdd_reduce();
    let size = dd.size();
    let root = dd.root();
    dd.zdd_reduce();
    assert_eq!(dd.size(), size);
    assert_eq!(dd.root(), root);
}

// Invariant 4: the power spec counts 2^E.
#[test]
fn invariant_power_sanity() {
    for (v, edges) in [(3usize, &TRIANGLE[..]), (4, &K4[..]), (4, &C4[..])] {
        let g = graph(v, edges, Ordering::Bfs);
        let dd = reduced(&Power::new(g.num_edges()));
        assert_eq!(
            dd.cardinality(),
            num_bigint::BigUint::from(1u8) << edges.len()
        );
    }
}

// Invariant 5: every accepted set of the s-t path spec induces a simple
// 0..t path.
#[test]
fn invariant_accepted_sets_are_simple_paths() {
    let g = graph(4, &K4, Ordering::AsIs);
    let n = g.num_edges();
    let dd = reduced(&Simpath::path(&g, 0, 3));

    for set in dd.sets() {
        let mut deg = [0usize; 4];
        for &level in &set {
            let e = g.edge(n - level as usize);
            deg[e.v1 as usize] += 1;
            deg[e.v2 as usize] += 1;
        }
        // Endpoints have degree 1, interior vertices degree 0 or 2, and the
        // edge count pins a single open walk, hence a simple path.
        assert_eq!(deg[0], 1);
        assert_eq!(deg[3], 1);
        assert!(deg[1] == 0 || deg[1] == 2);
        assert!(deg[2] == 0 || deg[2] == 2);
        assert_eq!(deg.iter().sum::<usize>(), 2 * set.len());
    }
}

// Invariant 6: accepted forest sets are acyclic, checked by union-find.
#[test]
fn invariant_forests_are_acyclic() {
    let g = graph(4, &K4, Ordering::Dfs);
    let n = g.num_edges();
    let dd = reduced(&Components::new(&g, Mode::Forest, IntSubset::new(), IntSubset::new()));

    for set in dd.sets() {
        let mut parent: Vec<usize> = (0..4).collect();
        fn find(parent: &mut Vec<usize>, x: usize) -> usize {
            if parent[x] != x {
                let r = find(parent, parent[x]);
                parent[x] = r;
            }
            parent[x]
        }
        for &level in &set {
            let e = g.edge(n - level as usize);
            let (a, b) = (find(&mut parent, e.v1 as usize), find(&mut parent, e.v2 as usize));
            assert_ne!(a, b, "cycle in accepted forest set");
            parent[a] = b;
        }
    }
}

// Invariant 7: dump and import agree on cardinality.
#[test]
fn invariant_dump_import_round_trip() {
    let g = graph(4, &K4, Ordering::Bfs);
    for dd in [
        reduced(&Simpath::path(&g, 0, 3)),
        reduced(&Simpath::cycle(&g)),
        reduced(&Components::new(&g, Mode::Forest, IntSubset::from(vec![1]), IntSubset::new())),
    ] {
        let mut text = Vec::new();
        dd.dump_sapporo(&mut text).unwrap();
        let rebuilt = reduced(&ImportedZdd::read(Cursor::new(text)).unwrap());
        assert_eq!(rebuilt.cardinality(), dd.cardinality());
    }
}

// Hybrid and edge-variable forms agree wherever both exist.
#[test]
fn hybrid_and_edge_var_agree() {
    for ordering in ORDERINGS {
        let h = hybrid(4, &K4, ordering);
        let fam = GraphFamilies::new(h);
        for (a, b) in [
            (fam.st_path(Some((0, 3)), true), fam.st_path(Some((0, 3)), false)),
            (fam.cycle(true), fam.cycle(false)),
            (
                fam.forest(IntSubset::from(vec![1]), IntSubset::new(), true),
                fam.forest(IntSubset::from(vec![1]), IntSubset::new(), false),
            ),
        ] {
            assert_eq!(a.cardinality(), b.cardinality(), "{:?}", ordering);
        }
    }
}

// Steiner trees over all orderings: triangle plus a pendant vertex.
#[test]
fn steiner_tree_with_pendant_terminal() {
    let edges = [(0, 1), (1, 2), (0, 2), (2, 3)];
    for ordering in ORDERINGS {
        let g = graph(4, &edges, ordering);
        // Trees connecting 0 and 3 must run through 2 (or 1 and 2).
        let dd = reduced(&Components::new(
            &g,
            Mode::Tree,
            IntSubset::new(),
            IntSubset::from(vec![0, 3]),
        ));
        // {02,23}, {01,12,23}, {01,02,23}, {12,02,23}: every tree containing
        // both terminals.
        assert_eq!(dd.cardinality().to_string(), "4", "{:?}", ordering);
    }
}
