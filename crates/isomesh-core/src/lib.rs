//! Core types, math, and traits for the isomesh voxel mesher.
//!
//! This crate provides the foundational types shared by the mesher and its
//! render collaborators:
//! - Vertex and color types handed to the renderer
//! - Grid dimensions and cell coordinates
//! - Bounding-box math
//! - The crate-wide error type

pub mod coords;
pub mod error;
pub mod math;
pub mod types;

pub use coords::{CellPos, GridDims};
pub use error::{Error, Result};
pub use math::Aabb;
pub use types::{Color, Vertex};

/// Mesher-wide constants
pub mod constants {
    /// Corners of a unit cell
    pub const CORNER_COUNT: usize = 8;
    /// Edges of a unit cell
    pub const EDGE_COUNT: usize = 12;
    /// Number of marching-cubes cases (2^8)
    pub const CASE_COUNT: usize = 256;
    /// Width of a triangulation table row
    pub const TRI_ROW_LEN: usize = 16;
    /// Samples at or above this value count as inside the surface
    pub const ISO_THRESHOLD: f32 = 0.4;
    /// Triangulation entries read per cell before the walk stops
    pub const TRIANGLE_WALK_LIMIT: usize = 12;
    /// Default edge length of a generated chunk, in cells
    pub const DEFAULT_CHUNK_SIZE: u32 = 16;
}
