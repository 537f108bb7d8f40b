//! Crate-wide error type.
//!
//! Only input-driven failures are represented here: malformed graph or dump
//! text, out-of-range vertices, and frontiers too large for the 16-bit mate
//! encoding. Violations of internal invariants (building items before an
//! ordering is fixed, a relabel producing an out-of-range component id) are
//! programming errors and panic via `assert!`, they are not recoverable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// `add_edge` was given a vertex outside `[0, V)`.
    #[error("vertex {vertex} out of range (graph has {num_vertices} vertices)")]
    VertexOutOfRange { vertex: i64, num_vertices: usize },

    /// The graph text could not be parsed.
    #[error("malformed graph input '{file}': {message}")]
    MalformedInput { file: String, message: String },

    /// A Sapporo dump could not be parsed.
    #[error("malformed dump: {0}")]
    MalformedDump(String),

    /// The ordering produced a frontier too large for the mate encoding.
    /// Choosing another ordering usually helps.
    #[error("frontier size {size} exceeds mate capacity {max}")]
    FrontierOverflow { size: usize, max: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
