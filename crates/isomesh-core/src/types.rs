//! Vertex types handed to the rendering collaborator.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Linear RGB color, one float per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Placeholder color given to every surface vertex
    pub const DEBUG: Self = Self::new(1.0, 0.4, 0.4);
    /// White
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a new color
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to glam Vec3
    #[inline]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Channels as an array
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[f32; 3]> for Color {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// A single triangle vertex: grid-relative position and color.
///
/// The layout is two tightly packed `vec3`s, which is what the vertex
/// shader's input bindings expect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Vertex {
    /// Position in grid space
    pub position: [f32; 3],
    /// Vertex color
    pub color: Color,
}

impl Vertex {
    /// Create a new vertex
    #[inline]
    pub const fn new(position: [f32; 3], color: Color) -> Self {
        Self { position, color }
    }

    /// Position as glam Vec3
    #[inline]
    pub const fn position_vec3(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }

    /// True if every position component is finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_six_packed_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 6 * std::mem::size_of::<f32>());
        assert_eq!(std::mem::align_of::<Vertex>(), std::mem::align_of::<f32>());
    }

    #[test]
    fn vertex_bytes_follow_field_order() {
        let vertex = Vertex::new([1.0, 2.0, 3.0], Color::new(0.5, 0.25, 0.125));
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn non_finite_position_detected() {
        let vertex = Vertex::new([f32::NAN, 0.0, 0.0], Color::DEBUG);
        assert!(!vertex.is_finite());
        assert!(Vertex::default().is_finite());
    }
}
