//! Graphviz rendering of a diagram.

use std::collections::BTreeMap;

use crate::node::NodeRef;
use crate::structure::DdStructure;

impl DdStructure {
    /// Renders the diagram as a Graphviz digraph: one rank per level, solid
    /// 1-edges, dashed 0-edges, terminals as rectangular sinks.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        fn name(r: NodeRef) -> String {
            if r.is_zero() {
                "B".to_string()
            } else if r.is_one() {
                "T".to_string()
            } else {
                format!("n{}_{}", r.level, r.col)
            }
        }

        let mut dot = String::new();
        writeln!(dot, "digraph zdd {{")?;
        writeln!(dot, "node [shape=circle, fixedsize=true];")?;

        // Terminals
        writeln!(dot, "{{ rank=sink")?;
        writeln!(dot, "B [shape=rect, label=\"0\"];")?;
        writeln!(dot, "T [shape=rect, label=\"1\"];")?;
        writeln!(dot, "}}")?;

        // Nodes per level
        let mut ranks = BTreeMap::<usize, Vec<u32>>::new();
        for level in 1..=self.top_level() {
            for col in 0..self.level_nodes(level).len() {
                ranks.entry(level).or_default().push(col as u32);
            }
        }
        for (&level, cols) in ranks.iter().rev() {
            writeln!(dot, "{{ rank=same")?;
            for &col in cols {
                let label = format!("<x<SUB>{}</SUB>>", level);
                writeln!(dot, "n{}_{} [label={}];", level, col, label)?;
            }
            writeln!(dot, "}}")?;
        }

        // Edges
        for level in (1..=self.top_level()).rev() {
            for (col, node) in self.level_nodes(level).iter().enumerate() {
                let from = name(NodeRef::new(level as u32, col as u32));
                writeln!(dot, "{} -> {} [style=dashed];", from, name(node.lo))?;
                writeln!(dot, "{} -> {};", from, name(node.hi))?;
            }
        }

        // Root marker
        writeln!(dot, "{{ rank=source")?;
        writeln!(dot, "root [shape=rect, label=\"{}\"];", self.root())?;
        writeln!(dot, "}}")?;
        writeln!(dot, "root -> {};", name(self.root()))?;

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::build;
    use crate::spec::power::Power;

    #[test]
    fn test_dot_mentions_every_node() {
        let mut dd = build(&Power::new(3));
        dd.zdd_reduce();

        let dot = dd.to_dot().unwrap();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("rank=sink"));
        for level in 1..=3 {
            assert!(dot.contains(&format!("n{}_0", level)));
        }
    }
}
