//! Undirected graph model and frontier-aware edge orderings.
//!
//! The whole construction pipeline starts here: `set_order` linearizes the
//! edge multiset with one of four strategies and then runs an
//! ordering-independent pass that assigns every vertex a *mate slot* for the
//! lifetime of its frontier membership. Slots are dispensed from a min-pool at
//! the first mention of a vertex (`in` flag) and recycled at its last mention
//! (`out` flag), so the peak number of live slots — `max_frontier_size` — is
//! what bounds the per-node state arrays of every specification.
//!
//! # Invariants
//!
//! After `set_order` succeeds:
//! - every vertex with degree ≥ 1 has exactly one edge with its `in` flag and
//!   exactly one with its `out` flag;
//! - the slot assigned at `in` is observed unchanged by every intervening
//!   edge until `out`;
//! - `max_frontier_size()` is one past the highest slot ever occupied.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, VecDeque};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use hashbrown::{HashMap, HashSet};

use crate::error::{Error, Result};

/// Slot value meaning "not currently assigned".
const UNASSIGNED: usize = usize::MAX;

/// Largest frontier the 16-bit mate encodings can index.
const MATE_CAPACITY: usize = i16::MAX as usize;

/// Edge-ordering strategy.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Ordering {
    /// Keep the input order.
    AsIs,
    /// Depth-first from vertex 0 upward, each edge at first visitation.
    Dfs,
    /// Breadth-first per component, sorted-neighbor order within a component.
    #[default]
    Bfs,
    /// Heuristic that repeatedly expands the minimum-remaining-degree frontier
    /// vertex, aiming for a small peak frontier.
    Greedy,
}

impl FromStr for Ordering {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "as-is" => Ok(Ordering::AsIs),
            "dfs" => Ok(Ordering::Dfs),
            "bfs" => Ok(Ordering::Bfs),
            "greedy" => Ok(Ordering::Greedy),
            _ => Err(format!("unknown ordering '{}'", s)),
        }
    }
}

/// An ordered edge together with its frontier metadata.
///
/// `i1`/`i2` are the mate slots of `v1`/`v2` for this edge's position in the
/// order. `in*`/`out*` mark the first and last mention of the endpoint.
#[derive(Debug, Clone)]
pub struct Edge {
    pub v1: u32,
    pub v2: u32,
    pub i1: usize,
    pub i2: usize,
    pub in1: bool,
    pub in2: bool,
    pub out1: bool,
    pub out2: bool,
}

impl Edge {
    fn new(v1: u32, v2: u32) -> Self {
        Self {
            v1,
            v2,
            i1: UNASSIGNED,
            i2: UNASSIGNED,
            in1: false,
            in2: false,
            out1: false,
            out2: false,
        }
    }
}

// Identity is the endpoint pair plus the in/out flags; slots are derived.
impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.v1 == other.v1
            && self.v2 == other.v2
            && self.in1 == other.in1
            && self.in2 == other.in2
            && self.out1 == other.out1
            && self.out2 == other.out2
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.v1, self.v2, self.in1, self.in2, self.out1, self.out2).hash(state);
    }
}

/// Per-edge projections computed during the mate pass.
///
/// `rm1`/`rm2` are the remaining degrees of the endpoints after this edge.
/// `adj1`/`adj2` list the frontier vertices already adjacent to the endpoint
/// through earlier edges, and `frontier` snapshots the frontier with both
/// endpoints inserted. All lists are sorted.
#[derive(Debug, Default, Clone)]
pub struct AddInfo {
    pub rm1: usize,
    pub rm2: usize,
    pub adj1: Vec<u32>,
    pub adj2: Vec<u32>,
    pub frontier: Vec<u32>,
}

pub struct Graph {
    num_vertices: usize,
    ordered: bool,
    max_fsize: usize,

    /// Edge multiset, keyed by the (directed) pair as given to `add_edge`.
    emap: HashMap<(u32, u32), usize>,
    /// Input order, with multiplicity.
    as_is: Vec<(u32, u32)>,

    edges: Vec<Edge>,
    add_info: Vec<AddInfo>,
    mate_index: Vec<usize>,
}

impl Graph {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            ordered: false,
            max_fsize: 0,
            emap: HashMap::new(),
            as_is: Vec::new(),
            edges: Vec::new(),
            add_info: Vec::new(),
            mate_index: Vec::new(),
        }
    }

    /// Adds an undirected edge. Duplicate edges are allowed and kept.
    pub fn add_edge(&mut self, v1: u32, v2: u32) -> Result<()> {
        for v in [v1, v2] {
            if v as usize >= self.num_vertices {
                return Err(Error::VertexOutOfRange {
                    vertex: v as i64,
                    num_vertices: self.num_vertices,
                });
            }
        }
        *self.emap.entry((v1, v2)).or_insert(0) += 1;
        self.as_is.push((v1, v2));
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_edges(&self) -> usize {
        if self.ordered {
            self.edges.len()
        } else {
            self.as_is.len()
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    pub fn edge(&self, i: usize) -> &Edge {
        assert!(self.ordered, "edge() before set_order");
        &self.edges[i]
    }

    pub fn add_info(&self, i: usize) -> &AddInfo {
        assert!(self.ordered, "add_info() before set_order");
        &self.add_info[i]
    }

    /// Peak frontier size of the current ordering.
    pub fn max_frontier_size(&self) -> usize {
        assert!(self.ordered, "max_frontier_size() before set_order");
        self.max_fsize
    }

    /// The mate slot assigned to `v`. Meaningful only while `v` is on the
    /// frontier of the position being examined.
    pub fn mate_slot(&self, v: u32) -> usize {
        let slot = self.mate_index[v as usize];
        assert_ne!(slot, UNASSIGNED, "mate_slot of a vertex never on the frontier");
        slot
    }

    pub fn find_edge(&self, u: u32, v: u32) -> bool {
        self.emap.contains_key(&(u, v))
    }

    pub fn is_adj(&self, u: u32, v: u32) -> bool {
        self.find_edge(u, v) || self.find_edge(v, u)
    }

    /// Fixes the edge order and runs the mate-slot pass.
    pub fn set_order(&mut self, ordering: Ordering) -> Result<()> {
        assert!(!self.as_is.is_empty(), "set_order on a graph with no edges");
        self.ordered = false;

        self.edges.clear();
        self.add_info.clear();

        match ordering {
            Ordering::AsIs => self.as_is_ordering(),
            Ordering::Dfs => self.dfs_ordering(),
            Ordering::Bfs => self.bfs_ordering(),
            Ordering::Greedy => self.greedy_ordering(),
        }

        self.set_mate_order();

        if self.max_fsize > MATE_CAPACITY {
            return Err(Error::FrontierOverflow {
                size: self.max_fsize,
                max: MATE_CAPACITY,
            });
        }

        self.ordered = true;
        Ok(())
    }

    fn as_is_ordering(&mut self) {
        for &(u, v) in &self.as_is {
            self.edges.push(Edge::new(u, v));
        }
    }

    /// Emits every stored copy of the pair `(u, v)` if present and not yet
    /// emitted, updating remaining degrees. Returns whether anything was
    /// emitted.
    fn emit_pair(&mut self, u: u32, v: u32, deg: &mut [i64], used: &mut HashSet<(u32, u32)>) -> bool {
        if used.contains(&(u, v)) {
            return false;
        }
        let Some(&cnt) = self.emap.get(&(u, v)) else {
            used.insert((u, v));
            return false;
        };
        for _ in 0..cnt {
            self.edges.push(Edge::new(u, v));
        }
        deg[u as usize] -= cnt as i64;
        deg[v as usize] -= cnt as i64;
        used.insert((u, v));
        true
    }

    fn greedy_ordering(&mut self) {
        let n = self.num_vertices;
        let mut deg = vec![0i64; n + 1];
        for &(u, v) in &self.as_is {
            deg[u as usize] += 1;
            deg[v as usize] += 1;
        }
        deg[n] = i64::MAX; // pivot sentinel

        let mut used: HashSet<(u32, u32)> = HashSet::new();
        let mut frontier: BTreeSet<u32> = BTreeSet::new();

        loop {
            // Close out every pending edge between frontier vertices.
            let front: Vec<u32> = frontier.iter().copied().collect();
            let mut done: Vec<u32> = Vec::new();
            for (a, &u) in front.iter().enumerate() {
                for &v in &front[a + 1..] {
                    self.emit_pair(u, v, &mut deg, &mut used);
                    self.emit_pair(v, u, &mut deg, &mut used);
                    if deg[u as usize] == 0 {
                        done.push(u);
                    }
                    if deg[v as usize] == 0 {
                        done.push(v);
                    }
                }
            }
            for v in done {
                frontier.remove(&v);
            }

            // Pivot: minimum remaining degree, preferring frontier vertices.
            let mut piv = n;
            if frontier.is_empty() {
                for v in 0..n {
                    if deg[v] > 0 && deg[piv] > deg[v] {
                        piv = v;
                    }
                }
                if piv == n {
                    break;
                }
            } else {
                for &x in &frontier {
                    if deg[piv] > deg[x as usize] {
                        piv = x as usize;
                    }
                }
            }

            let u = piv as u32;
            for v in 0..n as u32 {
                if self.emit_pair(u, v, &mut deg, &mut used) {
                    frontier.insert(v);
                }
                if self.emit_pair(v, u, &mut deg, &mut used) {
                    frontier.insert(v);
                }
                if deg[u as usize] == 0 {
                    frontier.remove(&u);
                }
                if deg[v as usize] == 0 {
                    frontier.remove(&v);
                }
            }
        }
    }

    fn dfs_ordering(&mut self) {
        let n = self.num_vertices;
        let mut vis = vec![false; n];
        let mut used: HashSet<(u32, u32)> = HashSet::new();
        for v in 0..n as u32 {
            self.dfs(v, &mut vis, &mut used);
        }
    }

    fn dfs(&mut self, v: u32, vis: &mut [bool], used: &mut HashSet<(u32, u32)>) {
        if vis[v as usize] {
            return;
        }
        vis[v as usize] = true;

        for u in 0..self.num_vertices as u32 {
            if used.contains(&(u, v)) {
                continue;
            }
            if let Some(&cnt) = self.emap.get(&(u, v)) {
                for _ in 0..cnt {
                    self.edges.push(Edge::new(u, v));
                }
            }
            if let Some(&cnt) = self.emap.get(&(v, u)) {
                for _ in 0..cnt {
                    self.edges.push(Edge::new(v, u));
                }
            }
            used.insert((u, v));
            used.insert((v, u));
            if self.is_adj(u, v) {
                self.dfs(u, vis, used);
            }
        }
    }

    fn bfs_ordering(&mut self) {
        let n = self.num_vertices;
        let mut adjlist: Vec<Vec<u32>> = vec![Vec::new(); n];
        for &(u, v) in self.emap.keys() {
            adjlist[u as usize].push(v);
            adjlist[v as usize].push(u);
        }
        for adj in &mut adjlist {
            adj.sort_unstable();
        }

        let mut vis = vec![false; n];
        let mut used: HashSet<(u32, u32)> = HashSet::new();

        for start in 0..n as u32 {
            if vis[start as usize] {
                continue;
            }
            let mut queue = VecDeque::new();
            queue.push_back(start);
            while let Some(v) = queue.pop_front() {
                if vis[v as usize] {
                    continue;
                }
                vis[v as usize] = true;
                for i in 0..adjlist[v as usize].len() {
                    let u = adjlist[v as usize][i];
                    if !vis[u as usize] {
                        queue.push_back(u);
                    }
                    if used.contains(&(u, v)) {
                        continue;
                    }
                    if let Some(&cnt) = self.emap.get(&(u, v)) {
                        for _ in 0..cnt {
                            self.edges.push(Edge::new(u, v));
                        }
                    }
                    if let Some(&cnt) = self.emap.get(&(v, u)) {
                        for _ in 0..cnt {
                            self.edges.push(Edge::new(v, u));
                        }
                    }
                    used.insert((u, v));
                    used.insert((v, u));
                }
            }
        }
    }

    /// The ordering-independent pass: walk the emitted edges, maintain
    /// remaining degrees and the live-slot pool, and stamp `in`/`out` flags,
    /// slots and `AddInfo` onto every edge.
    fn set_mate_order(&mut self) {
        let n = self.num_vertices;

        let mut deg = vec![0usize; n];
        for &(u, v) in &self.as_is {
            deg[u as usize] += 1;
            deg[v as usize] += 1;
        }

        let mut adjv: Vec<BTreeSet<u32>> = vec![BTreeSet::new(); n];
        let mut frontier: BTreeSet<u32> = BTreeSet::new();

        self.mate_index = vec![UNASSIGNED; n];
        let mut pool: BinaryHeap<Reverse<usize>> = (0..=n).map(Reverse).collect();

        for e in &mut self.edges {
            let (v1, v2) = (e.v1 as usize, e.v2 as usize);

            deg[v1] -= 1;
            deg[v2] -= 1;

            frontier.insert(e.v1);
            frontier.insert(e.v2);

            self.add_info.push(AddInfo {
                rm1: deg[v1],
                rm2: deg[v2],
                adj1: adjv[v1].iter().copied().collect(),
                adj2: adjv[v2].iter().copied().collect(),
                frontier: frontier.iter().copied().collect(),
            });

            adjv[v1].insert(e.v2);
            adjv[v2].insert(e.v1);

            e.in1 = self.mate_index[v1] == UNASSIGNED;
            e.in2 = self.mate_index[v2] == UNASSIGNED;

            if deg[v1] == 0 {
                e.out1 = true;
                frontier.remove(&e.v1);
                for adj in adjv.iter_mut() {
                    adj.remove(&e.v1);
                }
            }
            if deg[v2] == 0 {
                e.out2 = true;
                frontier.remove(&e.v2);
                for adj in adjv.iter_mut() {
                    adj.remove(&e.v2);
                }
            }

            if e.in1 {
                let Reverse(slot) = pool.pop().expect("slot pool exhausted");
                self.mate_index[v1] = slot;
            }
            e.i1 = self.mate_index[v1];

            if e.in2 {
                let Reverse(slot) = pool.pop().expect("slot pool exhausted");
                self.mate_index[v2] = slot;
            }
            e.i2 = self.mate_index[v2];

            if e.out1 {
                pool.push(Reverse(self.mate_index[v1]));
            }
            if e.out2 {
                pool.push(Reverse(self.mate_index[v2]));
            }
        }

        self.max_fsize = self
            .mate_index
            .iter()
            .filter(|&&s| s != UNASSIGNED)
            .map(|&s| s + 1)
            .max()
            .unwrap_or(0);
    }
}
