//! Error types for the mesher.

use thiserror::Error;

use crate::coords::CellPos;

/// Mesher-wide error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Edge index outside 0-11, a corrupted table lookup
    #[error("Edge doesn't exist: {edge}")]
    EdgeOutOfRange { edge: usize },

    /// Triangulation entry naming an edge the edge mask does not mark active
    #[error("Edge {edge} is not active for case {case_index}")]
    InactiveEdge { case_index: u8, edge: usize },

    /// Both endpoint samples of an edge sum to zero
    #[error("Degenerate edge {edge} in cell {cell:?}")]
    DegenerateEdge { edge: usize, cell: CellPos },

    /// Grid dimensions that cannot describe a volume
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid mesher configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Vertex data that cannot be drawn as a triangle list
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
