//! Game objects and per-draw push constants.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use hecs::{Entity, World};
use isomesh_core::Color;
use tracing::debug;

use crate::camera::Camera;
use crate::model::Model;
use crate::transform::TransformComponent;

/// Tint applied to a whole object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectColor(pub Color);

/// Data pushed to the shaders for one draw.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PushConstantData {
    /// `projection * view * model`.
    pub transform: [[f32; 4]; 4],
    pub color: [f32; 3],
    _padding: f32,
}

impl PushConstantData {
    pub fn new(transform: Mat4, color: Color) -> Self {
        Self {
            transform: transform.to_cols_array_2d(),
            color: color.to_array(),
            _padding: 0.0,
        }
    }
}

/// One object ready to be drawn.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub entity: Entity,
    pub model: Arc<Model>,
    pub push: PushConstantData,
}

/// Game objects stored in an ECS world.
///
/// Every object carries a shared [`Model`], a [`TransformComponent`] and an
/// [`ObjectColor`]. Object ids are the entity handles handed out by the
/// world.
#[derive(Default)]
pub struct Scene {
    world: World,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its id.
    pub fn spawn_object(
        &mut self,
        model: Arc<Model>,
        transform: TransformComponent,
        color: Color,
    ) -> Entity {
        let vertices = model.vertex_count();
        let entity = self.world.spawn((model, transform, ObjectColor(color)));
        debug!("Spawned object {:?} with {} vertices", entity, vertices);
        entity
    }

    /// Remove an object. Returns false if it did not exist.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    /// Ids of all objects, ordered by id.
    pub fn objects(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.world.iter().map(|e| e.entity()).collect();
        entities.sort_by_key(|e| e.id());
        entities
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    /// Current transform of an object.
    pub fn transform(&self, entity: Entity) -> Option<TransformComponent> {
        self.world
            .get::<&TransformComponent>(entity)
            .ok()
            .map(|t| *t)
    }

    /// Replace the transform of an object. Returns false if it did not exist.
    pub fn set_transform(&mut self, entity: Entity, transform: TransformComponent) -> bool {
        match self.world.get::<&mut TransformComponent>(entity) {
            Ok(mut current) => {
                *current = transform;
                true
            }
            Err(_) => false,
        }
    }

    /// Push constants for every object as seen through `camera`, ordered by
    /// id.
    #[cfg_attr(
        feature = "profiling-tracy",
        tracing::instrument(level = "trace", skip_all)
    )]
    pub fn push_constants(&self, camera: &Camera) -> Vec<DrawItem> {
        let projection_view = camera.view_projection();
        let mut query = self
            .world
            .query::<(&Arc<Model>, &TransformComponent, &ObjectColor)>();
        let mut items: Vec<DrawItem> = query
            .iter()
            .map(|(entity, (model, transform, color))| DrawItem {
                entity,
                model: Arc::clone(model),
                push: PushConstantData::new(projection_view * transform.mat4(), color.0),
            })
            .collect();
        items.sort_by_key(|item| item.entity.id());
        items
    }
}
