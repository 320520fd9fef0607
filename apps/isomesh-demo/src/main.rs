//! isomesh headless demo
//!
//! Meshes one chunk of a density field with marching cubes, wraps the result
//! in a model next to the reference cube and prepares the per-object push
//! constants a renderer would consume.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p isomesh-demo -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `--size <X> <Y> <Z>`: Chunk size in cells (default: 16 16 16)
//! - `--threshold <F>`: Inside threshold (default: 0.4)
//! - `--walk-limit <N>`: Triangulation entries read per cell (default: 12)
//! - `--field <KIND>`: `plane`, `sphere` or `terrain` (default: terrain)
//! - `--seed <N>`: Terrain seed (default: 42)
//! - `--degenerate <POLICY>`: `propagate`, `midpoint` or `fail` (default: midpoint)
//! - `--parallel`: Mesh x-slabs on the rayon pool
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod params;

use std::sync::Arc;

use anyhow::Context;
use glam::Vec3;
use isomesh_core::{Color, GridDims};
use isomesh_scene::{Camera, Model, Scene, TransformComponent};
use isomesh_world::{
    CachedField, Chunk, PlaneField, ScalarField, SphereField, TerrainConfig, TerrainField,
    WorldSeed,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
#[cfg(feature = "profiling-tracy")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::params::{DemoParams, FieldKind};

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;
const FOV_Y_DEGREES: f32 = 50.0;

fn main() -> anyhow::Result<()> {
    let params = DemoParams::from_args()?;
    if params.help {
        print_help();
        return Ok(());
    }

    init_logging();
    info!(
        "Meshing {:?} field, {}x{}x{} cells",
        params.field, params.chunk.dims.x, params.chunk.dims.y, params.chunk.dims.z
    );

    let field = build_field(&params);
    let chunk = Chunk::new(params.chunk.clone(), field.as_ref()).context("chunk build failed")?;

    let stats = chunk.stats();
    info!(
        "{} triangles from {} surface cells ({} cells visited)",
        stats.triangles, stats.surface_cells, stats.cells
    );
    if stats.truncated_rows > 0 {
        info!("{} cells hit the walk limit", stats.truncated_rows);
    }
    if let Some(bounds) = chunk.bounds() {
        info!("Mesh bounds: {} .. {}", bounds.min, bounds.max);
    }

    let scene = build_scene(&chunk)?;
    let mut camera = Camera::default();
    camera.set_perspective_projection(
        FOV_Y_DEGREES.to_radians(),
        WIDTH as f32 / HEIGHT as f32,
        0.1,
        100.0,
    )?;
    let extent = params.chunk.dims.to_uvec3().as_vec3().max_element();
    camera.set_view_target(
        Vec3::new(-0.5, -1.0, -1.5) * extent,
        Vec3::ZERO,
        Camera::DEFAULT_UP,
    );

    let draws = scene.push_constants(&camera);
    let mut upload_bytes = 0;
    for draw in &draws {
        upload_bytes += draw.model.as_bytes().len();
        debug!(
            "Draw {:?}: {} vertices, color {:?}",
            draw.entity,
            draw.model.vertex_count(),
            draw.push.color
        );
    }
    info!(
        "Prepared {} draws, {} bytes of vertex data",
        draws.len(),
        upload_bytes
    );

    Ok(())
}

fn init_logging() {
    #[cfg(feature = "profiling-tracy")]
    {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,isomesh_world=trace,isomesh_scene=trace,isomesh_demo=trace")
        });
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .with(tracing_tracy::TracyLayer::default())
            .init();
    }
    #[cfg(not(feature = "profiling-tracy"))]
    {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }
}

fn build_field(params: &DemoParams) -> Box<dyn ScalarField> {
    let dims = params.chunk.dims;
    match params.field {
        FieldKind::Plane => Box::new(PlaneField),
        FieldKind::Sphere => {
            let center = dims.to_uvec3().as_vec3() * 0.5;
            let radius = (dims.x.min(dims.y).min(dims.z) as f32 * 0.5 - 1.0).max(0.5);
            Box::new(SphereField::new(center, radius))
        }
        FieldKind::Terrain => {
            let config = terrain_config(params.seed, dims);
            Box::new(CachedField::new(TerrainField::new(config)))
        }
    }
}

fn terrain_config(seed: WorldSeed, dims: GridDims) -> TerrainConfig {
    let height = dims.y as f64;
    TerrainConfig {
        seed,
        base_height: (dims.y / 4) as i32,
        terrain_height: height * 0.5,
        ..Default::default()
    }
}

/// Chunk model centred on the origin plus the unit cube above it.
fn build_scene(chunk: &Chunk) -> anyhow::Result<Scene> {
    let mut scene = Scene::new();

    if chunk.is_empty() {
        warn!("Chunk produced no triangles, scene holds only the cube");
    } else {
        let model = Model::from_chunk(chunk)?;
        let center = model.bounds().map_or(Vec3::ZERO, |b| b.center());
        scene.spawn_object(
            Arc::new(model),
            TransformComponent::from_translation(-center),
            chunk.config().color,
        );
    }

    scene.spawn_object(
        Arc::new(Model::cube(Vec3::ZERO)),
        TransformComponent::from_translation(Vec3::new(0.0, 0.0, 2.5))
            .with_scale(Vec3::splat(0.5)),
        Color::WHITE,
    );

    Ok(scene)
}

fn print_help() {
    eprintln!(
        "isomesh headless demo

USAGE:
    cargo run -p isomesh-demo -- [OPTIONS]

MESH OPTIONS:
    --size <X> <Y> <Z>      Chunk size in cells (default: 16 16 16)
    --threshold <F>         Samples at or above this are inside (default: 0.4)
    --walk-limit <N>        Triangulation entries read per cell, a multiple of
                            3 up to 15 (default: 12)
    --degenerate <POLICY>   Edges whose samples sum to zero:
                            propagate, midpoint or fail (default: midpoint)
    --parallel              Mesh x-slabs in parallel

FIELD OPTIONS:
    --field <KIND>          plane, sphere or terrain (default: terrain)
    --seed <N>              Terrain seed (default: 42)

OTHER:
    -h, --help              Print this help message

EXAMPLES:
    # Terrain chunk with default settings
    cargo run -p isomesh-demo

    # Reference plane in a single cell, full trace output
    RUST_LOG=trace cargo run -p isomesh-demo -- --field plane --size 1 1 1

    # Large sphere meshed in parallel
    cargo run -p isomesh-demo -- --field sphere --size 64 64 64 --parallel

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
