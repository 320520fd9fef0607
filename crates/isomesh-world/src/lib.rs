//! Scalar fields and marching-cubes meshing for the isomesh voxel mesher.
//!
//! A [`Chunk`] samples a [`ScalarField`] at every corner of a block of unit
//! cells, classifies each cell against the iso threshold and emits a flat
//! triangle stream with one vertex per triangle corner.

pub mod cell;
pub mod chunk;
pub mod field;
pub mod interpolate;
pub mod tables;

pub use cell::{classify_cell, CellSample};
pub use chunk::{generate_mesh, polygonize_cell, Chunk, ChunkConfig, MeshStats, VertexSink};
pub use field::{CachedField, PlaneField, ScalarField, SphereField, TerrainConfig, TerrainField};
pub use interpolate::{edge_offset, interpolate_edge, DegenerateEdgePolicy};

/// World seed for procedural generation.
pub type WorldSeed = u64;
