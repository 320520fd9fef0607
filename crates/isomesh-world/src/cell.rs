//! Per-cell classification.

use isomesh_core::constants::CORNER_COUNT;
use isomesh_core::coords::CellPos;

use crate::field::ScalarField;
use crate::tables;

/// A classified cell: its corner samples and marching-cubes case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSample {
    /// Minimum corner of the cell.
    pub cell: CellPos,
    /// Bit `i` set iff corner `i` is inside the surface.
    pub case_index: u8,
    /// Raw field values at the 8 corners, in corner order.
    pub samples: [f32; CORNER_COUNT],
}

impl CellSample {
    /// Edges crossed by the surface in this cell.
    #[inline]
    pub fn edge_mask(&self) -> u16 {
        tables::edge_mask(self.case_index)
    }

    /// True if the cell lies entirely inside or outside the surface.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.case_index == 0 || self.case_index == u8::MAX
    }
}

/// Sample the 8 corners of `cell` and build its case index.
///
/// Corners are visited from 7 down to 0, shifting the index left before each
/// bit is OR-ed in, so corner 0 lands in the least significant bit. A corner
/// is inside when its sample is `>= threshold`.
#[inline]
pub fn classify_cell<F>(field: &F, cell: CellPos, threshold: f32) -> CellSample
where
    F: ScalarField + ?Sized,
{
    let mut samples = [0.0; CORNER_COUNT];
    let mut case_index = 0u8;

    for corner in (0..CORNER_COUNT).rev() {
        case_index <<= 1;

        let [x, y, z] = cell.corner(corner);
        let value = field.sample(x, y, z);
        if value >= threshold {
            case_index |= 1;
        }

        samples[corner] = value;
    }

    CellSample {
        cell,
        case_index,
        samples,
    }
}
