//! Math utilities and helpers.

use glam::Vec3;

use crate::types::Vertex;

/// Axis-Aligned Bounding Box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every finite vertex position.
    ///
    /// Returns `None` when there is no finite vertex.
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        let mut finite = vertices
            .iter()
            .filter(|v| v.is_finite())
            .map(Vertex::position_vec3);
        let first = finite.next()?;
        let mut aabb = Self::new(first, first);
        for p in finite {
            aabb.expand_to_include(p);
        }
        Some(aabb)
    }

    /// Get the center of the AABB
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the AABB
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if a point is inside the AABB
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Expand AABB to include a point
    #[inline]
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Merge two AABBs
    #[inline]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use approx::assert_relative_eq;

    #[test]
    fn aabb_contains_point() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::splat(0.5)));
        assert!(aabb.contains_point(Vec3::ZERO));
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::new(2.0, 0.5, 0.5)));
    }

    #[test]
    fn bounds_skip_non_finite_vertices() {
        let vertices = [
            Vertex::new([1.0, 2.0, 3.0], Color::DEBUG),
            Vertex::new([f32::INFINITY, 0.0, 0.0], Color::DEBUG),
            Vertex::new([-1.0, 0.5, 4.0], Color::DEBUG),
        ];
        let aabb = Aabb::from_vertices(&vertices).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, 0.5, 3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 4.0));
        assert_relative_eq!(aabb.center().x, 0.0);
    }

    #[test]
    fn bounds_of_nothing() {
        assert!(Aabb::from_vertices(&[]).is_none());
    }
}
