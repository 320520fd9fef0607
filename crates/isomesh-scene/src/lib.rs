//! Render-side collaborators for meshed chunks.
//!
//! Everything here is CPU data ready for upload: vertex models, camera
//! matrices and per-object push constants. Objects live in a [`hecs::World`].

pub mod camera;
pub mod model;
pub mod scene;
pub mod transform;

pub use camera::Camera;
pub use hecs::{Entity, World};
pub use model::Model;
pub use scene::{DrawItem, ObjectColor, PushConstantData, Scene};
pub use transform::TransformComponent;
