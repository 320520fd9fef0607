//! Grid and cell coordinates.

use glam::{IVec3, UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{CORNER_COUNT, DEFAULT_CHUNK_SIZE};
use crate::error::{Error, Result};

/// Offsets of the 8 cell corners from the cell's minimum corner.
///
/// Bottom face (z) counter-clockwise, then top face (z + 1) counter-clockwise.
/// The lookup tables are defined against this order.
pub const CORNER_OFFSETS: [[i32; 3]; CORNER_COUNT] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// A unit cell identified by its minimum corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellPos {
    /// Create a new cell position
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Grid coordinates of corner `index` (0-7)
    #[inline]
    pub const fn corner(self, index: usize) -> [i32; 3] {
        let o = CORNER_OFFSETS[index];
        [self.x + o[0], self.y + o[1], self.z + o[2]]
    }

    /// All 8 corners in canonical order
    pub fn corners(self) -> [[i32; 3]; CORNER_COUNT] {
        std::array::from_fn(|i| self.corner(i))
    }

    /// Convert to glam IVec3
    #[inline]
    pub const fn to_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// Convert to floating point Vec3
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        self.to_ivec3().as_vec3()
    }
}

impl From<IVec3> for CellPos {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Extent of the cell lattice `[0, x) × [0, y) × [0, z)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Default for GridDims {
    fn default() -> Self {
        Self::cube(DEFAULT_CHUNK_SIZE)
    }
}

impl GridDims {
    /// Create new grid dimensions
    #[inline]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Same extent on every axis
    #[inline]
    pub const fn cube(size: u32) -> Self {
        Self::new(size, size, size)
    }

    /// Reject empty extents and extents whose corners overflow `i32`.
    pub fn validate(self) -> Result<()> {
        if self.x == 0 || self.y == 0 || self.z == 0 {
            return Err(Error::InvalidDimensions(format!(
                "every axis must be positive, got {}x{}x{}",
                self.x, self.y, self.z
            )));
        }
        let max = self.x.max(self.y).max(self.z);
        if max >= i32::MAX as u32 {
            return Err(Error::InvalidDimensions(format!(
                "axis length {max} exceeds the corner coordinate range"
            )));
        }
        Ok(())
    }

    /// Total number of cells
    #[inline]
    pub const fn cell_count(self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Cells in scan order: x outermost, z innermost.
    pub fn cells(self) -> impl Iterator<Item = CellPos> {
        (0..self.x as i32).flat_map(move |x| self.slab(x))
    }

    /// Cells of the x-slab at `x`, in scan order.
    pub fn slab(self, x: i32) -> impl Iterator<Item = CellPos> {
        let (ny, nz) = (self.y as i32, self.z as i32);
        (0..ny).flat_map(move |y| (0..nz).map(move |z| CellPos::new(x, y, z)))
    }

    /// Convert to glam UVec3
    #[inline]
    pub const fn to_uvec3(self) -> UVec3 {
        UVec3::new(self.x, self.y, self.z)
    }
}

impl From<UVec3> for GridDims {
    fn from(v: UVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_follow_canonical_winding() {
        let cell = CellPos::new(2, 3, 4);
        let corners = cell.corners();
        assert_eq!(corners[0], [2, 3, 4]);
        assert_eq!(corners[1], [3, 3, 4]);
        assert_eq!(corners[2], [3, 4, 4]);
        assert_eq!(corners[3], [2, 4, 4]);
        assert_eq!(corners[4], [2, 3, 5]);
        assert_eq!(corners[6], [3, 4, 5]);
        assert_eq!(corners[7], [2, 4, 5]);
    }

    #[test]
    fn cells_scan_x_outermost() {
        let cells: Vec<_> = GridDims::new(2, 2, 2).cells().collect();
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0], CellPos::new(0, 0, 0));
        assert_eq!(cells[1], CellPos::new(0, 0, 1));
        assert_eq!(cells[2], CellPos::new(0, 1, 0));
        assert_eq!(cells[4], CellPos::new(1, 0, 0));
        assert_eq!(cells[7], CellPos::new(1, 1, 1));
    }

    #[test]
    fn zero_axis_rejected() {
        assert!(GridDims::new(0, 4, 4).validate().is_err());
        assert!(GridDims::new(4, 4, 0).validate().is_err());
        assert!(GridDims::cube(1).validate().is_ok());
    }

    #[test]
    fn cell_count_matches_iteration() {
        let dims = GridDims::new(3, 1, 5);
        assert_eq!(dims.cell_count(), dims.cells().count());
    }
}
