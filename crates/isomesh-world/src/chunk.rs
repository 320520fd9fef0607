//! Chunk meshing: walks the cell grid and assembles the triangle stream.

use std::ops::AddAssign;
use std::time::Instant;

use isomesh_core::constants::{EDGE_COUNT, ISO_THRESHOLD, TRIANGLE_WALK_LIMIT, TRI_ROW_LEN};
use isomesh_core::coords::{CellPos, GridDims};
use isomesh_core::{Aabb, Color, Error, Result, Vertex};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::cell::{classify_cell, CellSample};
use crate::field::ScalarField;
use crate::interpolate::{interpolate_edge, DegenerateEdgePolicy};
use crate::tables::{self, SENTINEL};

/// Chunk meshing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Extent of the cell grid.
    pub dims: GridDims,
    /// Samples at or above this value are inside the surface.
    pub threshold: f32,
    /// Triangulation entries read per cell. Rows longer than this are cut.
    pub triangle_walk_limit: usize,
    /// Handling of edges whose samples sum to zero.
    pub degenerate_edges: DegenerateEdgePolicy,
    /// Color given to every emitted vertex.
    pub color: Color,
    /// Mesh x-slabs on the rayon pool. Output order is unchanged.
    pub parallel: bool,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            dims: GridDims::default(),
            threshold: ISO_THRESHOLD,
            triangle_walk_limit: TRIANGLE_WALK_LIMIT,
            degenerate_edges: DegenerateEdgePolicy::default(),
            color: Color::DEBUG,
            parallel: false,
        }
    }
}

impl ChunkConfig {
    /// Reference settings, including unguarded division on degenerate edges.
    pub fn reference(dims: GridDims) -> Self {
        Self {
            dims,
            degenerate_edges: DegenerateEdgePolicy::Propagate,
            ..Default::default()
        }
    }

    /// Set the grid dimensions.
    #[must_use]
    pub const fn with_dims(mut self, dims: GridDims) -> Self {
        self.dims = dims;
        self
    }

    /// Set the inside threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the triangulation walk limit.
    #[must_use]
    pub const fn with_triangle_walk_limit(mut self, limit: usize) -> Self {
        self.triangle_walk_limit = limit;
        self
    }

    /// Set the degenerate-edge policy.
    #[must_use]
    pub const fn with_degenerate_edges(mut self, policy: DegenerateEdgePolicy) -> Self {
        self.degenerate_edges = policy;
        self
    }

    /// Set the vertex color.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable slab-parallel meshing.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the configuration before a build.
    pub fn validate(&self) -> Result<()> {
        self.dims.validate()?;
        if !self.threshold.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        let limit = self.triangle_walk_limit;
        if limit == 0 || limit % 3 != 0 || limit >= TRI_ROW_LEN {
            return Err(Error::InvalidConfig(format!(
                "triangle walk limit must be a multiple of 3 in 3..={}, got {limit}",
                TRI_ROW_LEN - 1
            )));
        }
        Ok(())
    }
}

/// Counters collected while meshing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshStats {
    /// Cells classified.
    pub cells: usize,
    /// Cells that emitted at least one triangle.
    pub surface_cells: usize,
    /// Triangles emitted.
    pub triangles: usize,
    /// Cells whose triangulation row was cut by the walk limit.
    pub truncated_rows: usize,
    /// Active edges whose samples summed to zero.
    pub degenerate_edges: usize,
}

impl AddAssign for MeshStats {
    fn add_assign(&mut self, rhs: Self) {
        self.cells += rhs.cells;
        self.surface_cells += rhs.surface_cells;
        self.triangles += rhs.triangles;
        self.truncated_rows += rhs.truncated_rows;
        self.degenerate_edges += rhs.degenerate_edges;
    }
}

/// Receives a finished triangle stream, three vertices per triangle.
pub trait VertexSink {
    /// Accept the vertices of a mesh.
    fn submit(&mut self, vertices: &[Vertex]);
}

impl VertexSink for Vec<Vertex> {
    fn submit(&mut self, vertices: &[Vertex]) {
        self.extend_from_slice(vertices);
    }
}

/// Emit the triangles of one classified cell into `out`.
///
/// Vertices are first computed for every active edge in ascending edge
/// order. The triangulation row is then walked from the start while the
/// entry is not the sentinel and fewer than `config.triangle_walk_limit`
/// entries have been read; each entry selects the vertex of its edge from the
/// active-edge list.
pub fn polygonize_cell(
    sample: &CellSample,
    config: &ChunkConfig,
    out: &mut Vec<Vertex>,
    stats: &mut MeshStats,
) -> Result<()> {
    stats.cells += 1;

    let mask = sample.edge_mask();
    if mask == 0 {
        return Ok(());
    }

    let mut cell_vertices = [Vertex::default(); EDGE_COUNT];
    let mut count = 0;
    for edge in tables::active_edges(mask) {
        let [lo, hi] = tables::EDGE_CORNERS[edge];
        if sample.samples[lo] + sample.samples[hi] == 0.0 {
            stats.degenerate_edges += 1;
            trace!(
                "Degenerate edge {} in cell {:?} (case {})",
                edge,
                sample.cell,
                sample.case_index
            );
        }
        cell_vertices[count] = interpolate_edge(
            &sample.samples,
            edge,
            sample.cell,
            config.color,
            config.degenerate_edges,
        )?;
        count += 1;
    }

    let row = tables::triangulation(sample.case_index);
    let limit = config.triangle_walk_limit;
    let mut i = 0;
    while i < limit && row[i] != SENTINEL {
        let edge = usize::try_from(row[i]).map_err(|_| Error::EdgeOutOfRange { edge: usize::MAX })?;
        if edge >= EDGE_COUNT {
            return Err(Error::EdgeOutOfRange { edge });
        }
        let slot = tables::edge_slot(mask, edge).ok_or(Error::InactiveEdge {
            case_index: sample.case_index,
            edge,
        })?;
        out.push(cell_vertices[slot]);
        i += 1;
    }

    if i == limit && row[i] != SENTINEL {
        stats.truncated_rows += 1;
        trace!(
            "Case {} truncated to {} of {} entries",
            sample.case_index,
            limit,
            tables::row_len(sample.case_index)
        );
    }
    if i > 0 {
        stats.surface_cells += 1;
        stats.triangles += i / 3;
    }

    Ok(())
}

/// Mesh a run of cells, appending to `out`.
fn polygonize_cells<F, I>(
    field: &F,
    cells: I,
    config: &ChunkConfig,
    out: &mut Vec<Vertex>,
) -> Result<MeshStats>
where
    F: ScalarField + ?Sized,
    I: Iterator<Item = CellPos>,
{
    let mut stats = MeshStats::default();
    for cell in cells {
        let sample = classify_cell(field, cell, config.threshold);
        polygonize_cell(&sample, config, out, &mut stats)?;
    }
    Ok(stats)
}

#[cfg_attr(
    feature = "profiling-tracy",
    tracing::instrument(level = "trace", skip_all)
)]
fn build_sequential<F>(field: &F, config: &ChunkConfig) -> Result<(Vec<Vertex>, MeshStats)>
where
    F: ScalarField + ?Sized,
{
    let mut vertices = Vec::new();
    let stats = polygonize_cells(field, config.dims.cells(), config, &mut vertices)?;
    Ok((vertices, stats))
}

#[cfg_attr(
    feature = "profiling-tracy",
    tracing::instrument(level = "trace", skip_all)
)]
fn build_parallel<F>(field: &F, config: &ChunkConfig) -> Result<(Vec<Vertex>, MeshStats)>
where
    F: ScalarField + ?Sized,
{
    let slabs = (0..config.dims.x as i32)
        .into_par_iter()
        .map(|x| {
            let mut slab = Vec::new();
            let stats = polygonize_cells(field, config.dims.slab(x), config, &mut slab)?;
            Ok((slab, stats))
        })
        .collect::<Result<Vec<_>>>()?;

    let total = slabs.iter().map(|(slab, _)| slab.len()).sum();
    let mut vertices = Vec::with_capacity(total);
    let mut stats = MeshStats::default();
    for (slab, slab_stats) in slabs {
        vertices.extend(slab);
        stats += slab_stats;
    }
    Ok((vertices, stats))
}

/// A meshed block of cells.
///
/// The triangle stream is built once in [`Chunk::new`] and never changes
/// afterwards.
#[derive(Debug, Clone)]
pub struct Chunk {
    config: ChunkConfig,
    vertices: Vec<Vertex>,
    stats: MeshStats,
}

impl Chunk {
    /// Mesh the whole grid described by `config`.
    ///
    /// The first error aborts the build; no partial mesh is returned.
    pub fn new<F>(config: ChunkConfig, field: &F) -> Result<Self>
    where
        F: ScalarField + ?Sized,
    {
        config.validate()?;

        let start = Instant::now();
        let (vertices, stats) = if config.parallel {
            build_parallel(field, &config)?
        } else {
            build_sequential(field, &config)?
        };

        debug!(
            "Meshed {}x{}x{} chunk: {} cells, {} surface cells, {} triangles in {:.2?}",
            config.dims.x,
            config.dims.y,
            config.dims.z,
            stats.cells,
            stats.surface_cells,
            stats.triangles,
            start.elapsed()
        );
        if stats.truncated_rows > 0 {
            warn!(
                "{} cells lost triangles to the walk limit of {}",
                stats.truncated_rows, config.triangle_walk_limit
            );
        }
        if stats.degenerate_edges > 0 {
            warn!(
                "{} degenerate edges handled as {:?}",
                stats.degenerate_edges, config.degenerate_edges
            );
        }

        Ok(Self {
            config,
            vertices,
            stats,
        })
    }

    /// The configuration this chunk was built with.
    pub const fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Triangle vertices in scan order, three per triangle.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Take ownership of the vertex stream.
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// True if no triangle was emitted.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Counters from the build.
    pub const fn stats(&self) -> &MeshStats {
        &self.stats
    }

    /// Bounds of all finite vertex positions.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_vertices(&self.vertices)
    }

    /// Hand the triangle stream to a consumer.
    pub fn submit_to<S: VertexSink + ?Sized>(&self, sink: &mut S) {
        sink.submit(&self.vertices);
    }
}

/// Mesh a grid with [`ChunkConfig::reference`] settings and return the
/// triangle stream.
pub fn generate_mesh<F>(dims: GridDims, field: &F) -> Result<Vec<Vertex>>
where
    F: ScalarField + ?Sized,
{
    Chunk::new(ChunkConfig::reference(dims), field).map(Chunk::into_vertices)
}
