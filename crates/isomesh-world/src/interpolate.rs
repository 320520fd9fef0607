//! Edge vertex placement.

use isomesh_core::constants::{CORNER_COUNT, EDGE_COUNT};
use isomesh_core::coords::CellPos;
use isomesh_core::{Color, Error, Result, Vertex};
use serde::{Deserialize, Serialize};

use crate::tables::{EDGE_AXIS, EDGE_CORNERS};

/// What to do when an edge's two samples sum to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegenerateEdgePolicy {
    /// Divide anyway; the position picks up `NaN` or an infinity.
    Propagate,
    /// Place the vertex halfway along the edge.
    #[default]
    Midpoint,
    /// Abort the build with [`Error::DegenerateEdge`].
    Fail,
}

/// Offset of the surface crossing from the lower endpoint of an edge.
///
/// `|a - b| / (a + b)`. This is not linear interpolation towards the
/// threshold; meshes are defined by this rule, so it is kept as is.
#[inline]
pub fn edge_offset(a: f32, b: f32) -> f32 {
    (a - b).abs() / (a + b)
}

/// Place the vertex for `edge` of `cell`.
///
/// The offset from [`edge_offset`] is added to the lower endpoint of the edge
/// along the edge's axis. `edge` must be in `0..12`.
pub fn interpolate_edge(
    samples: &[f32; CORNER_COUNT],
    edge: usize,
    cell: CellPos,
    color: Color,
    policy: DegenerateEdgePolicy,
) -> Result<Vertex> {
    if edge >= EDGE_COUNT {
        return Err(Error::EdgeOutOfRange { edge });
    }

    let [lo, hi] = EDGE_CORNERS[edge];
    let (a, b) = (samples[lo], samples[hi]);

    let offset = if a + b == 0.0 {
        match policy {
            DegenerateEdgePolicy::Propagate => edge_offset(a, b),
            DegenerateEdgePolicy::Midpoint => 0.5,
            DegenerateEdgePolicy::Fail => return Err(Error::DegenerateEdge { edge, cell }),
        }
    } else {
        edge_offset(a, b)
    };

    let corner = cell.corner(lo);
    let mut position = [corner[0] as f32, corner[1] as f32, corner[2] as f32];
    position[EDGE_AXIS[edge]] += offset;

    Ok(Vertex::new(position, color))
}
