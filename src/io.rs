//! Text I/O: graph input, Sapporo ZDD dumps, matrix dumps.
//!
//! # Graph File Format
//!
//! ```text
//! <V> <E>
//! <u> <v>     # one line per edge, 0-indexed, duplicates allowed
//! ```
//!
//! # Sapporo Dump Format (.zdd)
//!
//! ```text
//! .i <topLevel>
//! .o 1
//! .n <nodeCount>
//! <id> <level> <lo> <hi>   # nodes bottom-up, B = ⊥, T = ⊤
//! ...
//! <rootId>
//! ```
//!
//! # Matrix Format
//!
//! ```text
//! <cols> <rows>
//! <k> <c1> ... <ck>        # one accepting set per row, ascending 1-based
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::str::SplitWhitespace;

use crate::error::{Error, Result};
use crate::hybrid::HybridGraph;
use crate::node::NodeRef;
use crate::structure::DdStructure;

fn next_number(tokens: &mut SplitWhitespace<'_>, file: &str, what: &str) -> Result<usize> {
    let token = tokens.next().ok_or_else(|| Error::MalformedInput {
        file: file.to_string(),
        message: format!("missing {}", what),
    })?;
    token.parse::<usize>().map_err(|_| Error::MalformedInput {
        file: file.to_string(),
        message: format!("bad {} '{}'", what, token),
    })
}

/// Parses graph text. The graph comes back unordered; call `set_order` before
/// building anything on it.
pub fn read_graph<R: BufRead>(mut reader: R, file: &str) -> Result<HybridGraph> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut tokens = text.split_whitespace();

    let num_v = next_number(&mut tokens, file, "vertex count")?;
    let num_e = next_number(&mut tokens, file, "edge count")?;

    let mut graph = HybridGraph::new(num_v);
    for i in 0..num_e {
        let u = next_number(&mut tokens, file, &format!("edge {} endpoint", i))?;
        let v = next_number(&mut tokens, file, &format!("edge {} endpoint", i))?;
        graph.add_edge(u as u32, v as u32)?;
    }
    Ok(graph)
}

pub fn read_graph_file<P: AsRef<Path>>(path: P) -> Result<HybridGraph> {
    let name = path.as_ref().display().to_string();
    let file = File::open(&path)?;
    read_graph(BufReader::new(file), &name)
}

impl DdStructure {
    /// Writes the Sapporo text dump. Node ids are dense, bottom-up.
    pub fn dump_sapporo<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, ".i {}", self.top_level())?;
        writeln!(w, ".o 1")?;
        writeln!(w, ".n {}", self.size())?;

        let mut ids: Vec<Vec<u64>> = vec![Vec::new()];
        let mut next_id = 1u64;

        fn name(ids: &[Vec<u64>], r: NodeRef) -> String {
            if r.is_zero() {
                "B".to_string()
            } else if r.is_one() {
                "T".to_string()
            } else {
                ids[r.level as usize][r.col as usize].to_string()
            }
        }

        for level in 1..=self.top_level() {
            let mut level_ids = Vec::with_capacity(self.level_nodes(level).len());
            for node in self.level_nodes(level) {
                level_ids.push(next_id);
                writeln!(
                    w,
                    "{} {} {} {}",
                    next_id,
                    level,
                    name(&ids, node.lo),
                    name(&ids, node.hi)
                )?;
                next_id += 1;
            }
            ids.push(level_ids);
        }

        writeln!(w, "{}", name(&ids, self.root()))
    }

    /// Writes the accepting sets as a set-covering matrix. `col_of_level`
    /// maps `level - 1` to the 1-based column id of that item.
    pub fn dump_matrix<W: Write>(&self, w: &mut W, num_cols: usize, col_of_level: &[u32]) -> io::Result<()> {
        assert!(col_of_level.len() >= self.top_level());
        writeln!(w, "{} {}", num_cols, self.cardinality())?;

        for set in self.sets() {
            let mut cols: Vec<u32> = set.iter().map(|&lev| col_of_level[lev as usize - 1]).collect();
            cols.sort_unstable();
            write!(w, "{}", cols.len())?;
            for c in cols {
                write!(w, " {}", c)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::graph::Ordering;
    use crate::spec::import::ImportedZdd;
    use crate::spec::simpath::Simpath;
    use std::io::Cursor;

    #[test]
    fn test_read_graph() {
        let text = "3 2\n0 1\n1 2\n";
        let mut g = read_graph(Cursor::new(text), "test").unwrap();
        g.set_order(Ordering::AsIs).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn test_read_graph_rejects_bad_text() {
        assert!(read_graph(Cursor::new("3\n"), "t").is_err());
        assert!(read_graph(Cursor::new("3 1\n0 x\n"), "t").is_err());
        assert!(read_graph(Cursor::new("2 1\n0 5\n"), "t").is_err());
    }

    #[test]
    fn test_dump_import_round_trip() {
        let mut g = crate::graph::Graph::new(4);
        for (u, v) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();

        let spec = Simpath::path(&g, 0, 3);
        let mut dd = build(&spec);
        dd.zdd_reduce();

        let mut text = Vec::new();
        dd.dump_sapporo(&mut text).unwrap();

        let imported = ImportedZdd::read(Cursor::new(text)).unwrap();
        let mut rebuilt = build(&imported);
        rebuilt.zdd_reduce();

        assert_eq!(rebuilt.cardinality(), dd.cardinality());
        assert_eq!(rebuilt.size(), dd.size());
    }

    #[test]
    fn test_matrix_dump_shape() {
        let mut g = crate::graph::Graph::new(3);
        for (u, v) in [(0, 1), (1, 2), (0, 2)] {
            g.add_edge(u, v).unwrap();
        }
        g.set_order(Ordering::AsIs).unwrap();

        let spec = Simpath::path(&g, 0, 2);
        let mut dd = build(&spec);
        dd.zdd_reduce();

        // Column j of the matrix is item j (level n - j).
        let n = dd.top_level();
        let cols: Vec<u32> = (0..n).map(|level| (n - level) as u32).collect();

        let mut out = Vec::new();
        dd.dump_matrix(&mut out, n, &cols).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("3 2"));
        // Two paths: {e2} and {e0,e1}, as ascending 1-based columns.
        let mut rows: Vec<&str> = lines.collect();
        rows.sort_unstable();
        assert_eq!(rows, vec!["1 3", "2 1 2"]);
    }
}
