//! The level-indexed node table and ZDD reduction.
//!
//! A `DdStructure` owns one node array per level; children point strictly
//! downward, terminals live at level 0. `zdd_reduce` rewrites the table into
//! canonical form: no node's 1-edge reaches `⊥`, and no two nodes of a level
//! share a child pair. Reduction is idempotent.

use hashbrown::HashMap;
use log::debug;

use crate::node::{Node, NodeRef};

pub struct DdStructure {
    /// `levels[0]` is unused; terminals are implicit.
    levels: Vec<Vec<Node>>,
    root: NodeRef,
}

impl DdStructure {
    /// The constant `⊤` or `⊥` diagram.
    pub(crate) fn constant(one: bool) -> Self {
        Self {
            levels: Vec::new(),
            root: if one { NodeRef::ONE } else { NodeRef::ZERO },
        }
    }

    pub(crate) fn from_parts(levels: Vec<Vec<Node>>, root: NodeRef) -> Self {
        Self { levels, root }
    }

    pub fn root(&self) -> NodeRef {
        self.root
    }

    /// Number of levels above the terminals (the top variable index).
    pub fn top_level(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Total number of decision nodes.
    pub fn size(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn node(&self, r: NodeRef) -> Node {
        assert!(!r.is_terminal(), "terminals carry no node");
        self.levels[r.level as usize][r.col as usize]
    }

    /// The node array of one level, column-indexed.
    pub fn level_nodes(&self, level: usize) -> &[Node] {
        &self.levels[level]
    }

    /// Applies the ZDD reduction rules bottom-up: drop nodes whose 1-edge
    /// reaches `⊥` (redirecting to their 0-child) and merge nodes with equal
    /// child pairs.
    pub fn zdd_reduce(&mut self) {
        let num_levels = self.levels.len();

        // remap[level][col] — where the old node ended up.
        let mut remap: Vec<Vec<NodeRef>> = Vec::with_capacity(num_levels);
        remap.push(Vec::new());

        let resolve = |remap: &[Vec<NodeRef>], r: NodeRef| -> NodeRef {
            if r.is_terminal() {
                r
            } else {
                remap[r.level as usize][r.col as usize]
            }
        };

        for level in 1..num_levels {
            let old = std::mem::take(&mut self.levels[level]);
            let mut canon: HashMap<(NodeRef, NodeRef), u32> = HashMap::with_capacity(old.len());
            let mut nodes: Vec<Node> = Vec::new();
            let mut level_remap = Vec::with_capacity(old.len());

            for node in old {
                let lo = resolve(&remap, node.lo);
                let hi = resolve(&remap, node.hi);

                let target = if hi == NodeRef::ZERO {
                    // Zero-suppression.
                    lo
                } else {
                    let col = *canon.entry((lo, hi)).or_insert_with(|| {
                        nodes.push(Node::new(lo, hi));
                        (nodes.len() - 1) as u32
                    });
                    NodeRef::new(level as u32, col)
                };
                level_remap.push(target);
            }

            debug!("reduce: level {} {} -> {}", level, level_remap.len(), nodes.len());
            self.levels[level] = nodes;
            remap.push(level_remap);
        }

        self.root = resolve(&remap, self.root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-built diagram over 2 levels:
    ///   level 2: n0 = (lo -> level-1 col 0, hi -> ⊥)   [zero-suppressed]
    ///   level 1: n0 = (⊥, ⊤), n1 = (⊥, ⊤)              [duplicates]
    fn unreduced() -> DdStructure {
        let l1 = vec![
            Node::new(NodeRef::ZERO, NodeRef::ONE),
            Node::new(NodeRef::ZERO, NodeRef::ONE),
        ];
        let l2 = vec![Node::new(NodeRef::new(1, 0), NodeRef::new(1, 1))];
        DdStructure::from_parts(vec![Vec::new(), l1, l2], NodeRef::new(2, 0))
    }

    #[test]
    fn test_reduce_merges_and_suppresses() {
        let mut dd = unreduced();
        assert_eq!(dd.size(), 3);

        dd.zdd_reduce();
        // The two level-1 nodes merge; the level-2 node keeps both children.
        assert_eq!(dd.size(), 2);
        let root = dd.node(dd.root());
        assert_eq!(root.lo, NodeRef::new(1, 0));
        assert_eq!(root.hi, NodeRef::new(1, 0));
    }

    #[test]
    fn test_reduce_idempotent() {
        let mut dd = unreduced();
        dd.zdd_reduce();
        let once: Vec<Vec<Node>> = (1..=dd.top_level()).map(|l| dd.level_nodes(l).to_vec()).collect();
        let root_once = dd.root();

        dd.zdd_reduce();
        let twice: Vec<Vec<Node>> = (1..=dd.top_level()).map(|l| dd.level_nodes(l).to_vec()).collect();
        assert_eq!(once, twice);
        assert_eq!(root_once, dd.root());
    }

    #[test]
    fn test_zero_suppression_collapses_to_terminal() {
        // A single node whose 1-edge is ⊥ reduces away entirely.
        let l1 = vec![Node::new(NodeRef::ONE, NodeRef::ZERO)];
        let mut dd = DdStructure::from_parts(vec![Vec::new(), l1], NodeRef::new(1, 0));
        dd.zdd_reduce();
        assert_eq!(dd.size(), 0);
        assert!(dd.root().is_one());
    }

    #[test]
    fn test_reduce_propagates_dead_nodes() {
        // level 1: (⊥, ⊥) — reduces to ⊥; level 2 points at it with both
        // edges and must follow it down to ⊥.
        let l1 = vec![Node::new(NodeRef::ZERO, NodeRef::ZERO)];
        let l2 = vec![Node::new(NodeRef::new(1, 0), NodeRef::new(1, 0))];
        let mut dd = DdStructure::from_parts(vec![Vec::new(), l1, l2], NodeRef::new(2, 0));
        dd.zdd_reduce();
        assert_eq!(dd.size(), 0);
        assert!(dd.root().is_zero());
    }
}
