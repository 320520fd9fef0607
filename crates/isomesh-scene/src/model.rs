//! Vertex models.

use glam::Vec3;
use isomesh_core::{Aabb, Color, Error, Result, Vertex};
use isomesh_world::{Chunk, VertexSink};

/// A triangle list held in CPU memory, ready to be copied into a vertex
/// buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    vertices: Vec<Vertex>,
}

impl Model {
    /// Create a model from a triangle list.
    ///
    /// At least one triangle is required.
    pub fn new(vertices: Vec<Vertex>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::InvalidModel(format!(
                "vertex count must be at least 3, got {}",
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    /// Copy the triangle stream of a chunk.
    pub fn from_chunk(chunk: &Chunk) -> Result<Self> {
        let mut vertices = Vec::with_capacity(chunk.vertices().len());
        chunk.submit_to(&mut vertices);
        Self::new(vertices)
    }

    /// Unit cube centred on `offset`, one color per face.
    pub fn cube(offset: Vec3) -> Self {
        const WHITE: Color = Color::new(0.9, 0.9, 0.9);
        const YELLOW: Color = Color::new(0.8, 0.8, 0.1);
        const ORANGE: Color = Color::new(0.9, 0.6, 0.1);
        const RED: Color = Color::new(0.8, 0.1, 0.1);
        const BLUE: Color = Color::new(0.1, 0.1, 0.8);
        const GREEN: Color = Color::new(0.1, 0.8, 0.1);

        #[rustfmt::skip]
        let faces: [([[f32; 3]; 6], Color); 6] = [
            // left
            ([[-0.5, -0.5, -0.5], [-0.5, 0.5, 0.5], [-0.5, -0.5, 0.5],
              [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5]], WHITE),
            // right
            ([[0.5, -0.5, -0.5], [0.5, 0.5, 0.5], [0.5, -0.5, 0.5],
              [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]], YELLOW),
            // top, y points down
            ([[-0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5],
              [-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5]], ORANGE),
            // bottom
            ([[-0.5, 0.5, -0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5],
              [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]], RED),
            // front
            ([[-0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5],
              [-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5]], BLUE),
            // back
            ([[-0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5],
              [-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5]], GREEN),
        ];

        let vertices = faces
            .iter()
            .flat_map(|(positions, color)| {
                positions
                    .iter()
                    .map(move |&p| Vertex::new((Vec3::from(p) + offset).to_array(), *color))
            })
            .collect();

        Self { vertices }
    }

    /// Number of vertices, three per triangle.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The vertex list.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Bounds of all finite positions.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_vertices(&self.vertices)
    }
}

impl VertexSink for Model {
    fn submit(&mut self, vertices: &[Vertex]) {
        self.vertices.extend_from_slice(vertices);
    }
}
