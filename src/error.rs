use thiserror::Error;

use crate::graphs::Weight;

/// Errors reported by the graph store, the solver and the graph readers.
///
/// Every variant is a contract violation or a bad input file; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unknown vertex {0}")]
    UnknownVertex(String),

    #[error("invalid edge {tail} -- {head}: both endpoints must be added first")]
    InvalidEdge { tail: String, head: String },

    #[error("invalid weight {0}: weights must be finite and non-negative")]
    InvalidWeight(Weight),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid stored graph: {0}")]
    InvalidGraph(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
