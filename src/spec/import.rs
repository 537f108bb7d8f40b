//! An externally dumped ZDD presented through the [`DdSpec`] interface, so it
//! can be rebuilt or intersected with other specs.
//!
//! The expected text is the Sapporo dump format:
//!
//! ```text
//! .i <topLevel>
//! .o 1
//! .n <nodeCount>
//! <id> <level> <lo> <hi>
//! ...
//! <rootId>
//! ```
//!
//! `lo`/`hi` are `B` (also accepted: `F`) for the zero terminal, `T` for the
//! one terminal, or a node id. Ids are opaque; they are remapped on import.

use std::io::BufRead;

use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::spec::{DdSpec, Step};

const TERM_ZERO: i64 = -2;
const TERM_ONE: i64 = -1;

#[derive(Debug, Copy, Clone)]
struct ImportedNode {
    level: usize,
    zero: i64,
    one: i64,
}

pub struct ImportedZdd {
    top_level: usize,
    root_addr: i64,
    nodes: HashMap<i64, ImportedNode>,
}

fn parse_addr(token: &str) -> Result<i64> {
    match token {
        "B" | "F" => Ok(TERM_ZERO),
        "T" => Ok(TERM_ONE),
        _ => token
            .parse::<i64>()
            .map_err(|_| Error::MalformedDump(format!("bad node reference '{}'", token))),
    }
}

fn header_value(line: Option<std::io::Result<String>>, key: &str) -> Result<i64> {
    let line = line.ok_or_else(|| Error::MalformedDump(format!("missing {} header", key)))??;
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(k), Some(v)) if k == key => v
            .parse::<i64>()
            .map_err(|_| Error::MalformedDump(format!("bad {} value '{}'", key, v))),
        _ => Err(Error::MalformedDump(format!("expected '{} <n>', got '{}'", key, line))),
    }
}

impl ImportedZdd {
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let top_level = header_value(lines.next(), ".i")?;
        let _outputs = header_value(lines.next(), ".o")?;
        let count = header_value(lines.next(), ".n")?;

        let mut nodes = HashMap::with_capacity(count.max(0) as usize);
        for _ in 0..count {
            let line = lines
                .next()
                .ok_or_else(|| Error::MalformedDump("truncated node list".into()))??;
            let mut tokens = line.split_whitespace();
            let (Some(id), Some(level), Some(zero), Some(one)) =
                (tokens.next(), tokens.next(), tokens.next(), tokens.next())
            else {
                return Err(Error::MalformedDump(format!("bad node line '{}'", line)));
            };
            let id = id
                .parse::<i64>()
                .map_err(|_| Error::MalformedDump(format!("bad node id '{}'", id)))?;
            let level = level
                .parse::<usize>()
                .map_err(|_| Error::MalformedDump(format!("bad level '{}'", level)))?;
            nodes.insert(
                id,
                ImportedNode {
                    level,
                    zero: parse_addr(zero)?,
                    one: parse_addr(one)?,
                },
            );
        }

        let root_line = lines
            .next()
            .ok_or_else(|| Error::MalformedDump("missing root line".into()))??;
        let root_addr = parse_addr(root_line.trim())?;

        if root_addr >= 0 && !nodes.contains_key(&root_addr) {
            return Err(Error::MalformedDump(format!("unknown root id {}", root_addr)));
        }

        Ok(Self {
            top_level: top_level.max(0) as usize,
            root_addr,
            nodes,
        })
    }

    fn node(&self, addr: i64) -> &ImportedNode {
        self.nodes.get(&addr).expect("dangling node reference")
    }
}

impl DdSpec for ImportedZdd {
    type State = i64;

    fn root(&self) -> (Step, Self::State) {
        match self.root_addr {
            TERM_ZERO => (Step::Reject, 0),
            TERM_ONE => (Step::Accept, 0),
            addr => (Step::To(self.node(addr).level), addr),
        }
    }

    fn child(&self, addr: &mut Self::State, _level: usize, take: bool) -> Step {
        let node = self.node(*addr);
        *addr = if take { node.one } else { node.zero };

        match *addr {
            TERM_ZERO => Step::Reject,
            TERM_ONE => Step::Accept,
            next => Step::To(self.node(next).level),
        }
    }
}
