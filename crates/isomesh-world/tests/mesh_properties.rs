//! Whole-chunk meshing properties.

use glam::Vec3;
use isomesh_core::constants::{ISO_THRESHOLD, TRIANGLE_WALK_LIMIT};
use isomesh_core::{CellPos, Error, GridDims, Vertex};
use isomesh_world::tables;
use isomesh_world::{
    classify_cell, generate_mesh, CachedField, Chunk, ChunkConfig, DegenerateEdgePolicy,
    PlaneField, ScalarField, SphereField, TerrainField,
};

fn chunk(config: ChunkConfig, field: &impl ScalarField) -> Chunk {
    Chunk::new(config, field).expect("chunk build failed")
}

/// Field with corners 0, 2, 3, 4 and 5 of the unit cell inside.
fn case_61_field(x: i32, y: i32, z: i32) -> f32 {
    match (x, y, z) {
        (1, 0, 0) | (1, 1, 1) | (0, 1, 1) => 0.0,
        _ => 1.0,
    }
}

/// `0.5` on `x == 0`, `-0.5` elsewhere: every crossing edge sums to zero.
fn signed_plane(x: i32, _y: i32, _z: i32) -> f32 {
    if x == 0 {
        0.5
    } else {
        -0.5
    }
}

#[test]
fn vertex_count_is_sum_of_capped_rows() {
    let field = SphereField::new(Vec3::new(5.0, 4.0, 6.0), 3.7);
    let dims = GridDims::new(10, 9, 12);
    let mesh = chunk(ChunkConfig::default().with_dims(dims), &field);

    let expected: usize = dims
        .cells()
        .map(|cell| {
            let case = classify_cell(&field, cell, ISO_THRESHOLD).case_index;
            tables::row_len(case).min(TRIANGLE_WALK_LIMIT)
        })
        .sum();

    assert_eq!(mesh.vertices().len(), expected);
    assert_eq!(mesh.vertices().len() % 3, 0);
    assert_eq!(mesh.stats().cells, dims.cell_count());
}

#[test]
fn vertices_stay_inside_their_grid() {
    let field = TerrainField::with_seed(42);
    let dims = GridDims::new(16, 20, 16);
    let mesh = chunk(ChunkConfig::default().with_dims(dims), &field);
    assert!(!mesh.is_empty());

    let bounds = mesh.bounds().unwrap();
    assert!(bounds.min.cmpge(Vec3::ZERO).all());
    assert!(bounds.max.cmple(dims.to_uvec3().as_vec3()).all());
    assert!(mesh.vertices().iter().all(Vertex::is_finite));
}

#[test]
fn uniform_fields_emit_nothing() {
    let dims = GridDims::cube(6);
    let empty = chunk(ChunkConfig::default().with_dims(dims), &|_: i32, _: i32, _: i32| 0.0_f32);
    let full = chunk(ChunkConfig::default().with_dims(dims), &|_: i32, _: i32, _: i32| 1.0_f32);
    assert!(empty.is_empty());
    assert!(full.is_empty());
    assert_eq!(full.stats().surface_cells, 0);
}

#[test]
fn repeated_builds_are_byte_identical() {
    let field = TerrainField::with_seed(9001);
    let config = ChunkConfig::default().with_dims(GridDims::new(12, 16, 12));
    let a = chunk(config.clone(), &field);
    let b = chunk(config, &field);
    let a_bytes: &[u8] = bytemuck::cast_slice(a.vertices());
    let b_bytes: &[u8] = bytemuck::cast_slice(b.vertices());
    assert_eq!(a_bytes, b_bytes);
}

#[test]
fn single_cell_plane() {
    let vertices = generate_mesh(GridDims::cube(1), &PlaneField).unwrap();
    let sample = classify_cell(&PlaneField, CellPos::default(), ISO_THRESHOLD);
    assert_eq!(sample.case_index, 153);
    assert_eq!(vertices.len(), 6);

    let corners = [
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
    ];
    for v in &vertices {
        assert!(corners.contains(&v.position), "{:?}", v.position);
    }
    for corner in corners {
        assert!(vertices.iter().any(|v| v.position == corner));
    }
}

#[test]
fn long_rows_are_cut_at_walk_limit() {
    let dims = GridDims::cube(1);
    assert_eq!(classify_cell(&case_61_field, CellPos::default(), ISO_THRESHOLD).case_index, 61);
    assert_eq!(tables::row_len(61), 15);

    let capped = chunk(ChunkConfig::default().with_dims(dims), &case_61_field);
    assert_eq!(capped.vertices().len(), 12);
    assert_eq!(capped.stats().truncated_rows, 1);

    let full = chunk(
        ChunkConfig::default()
            .with_dims(dims)
            .with_triangle_walk_limit(15),
        &case_61_field,
    );
    assert_eq!(full.vertices().len(), 15);
    assert_eq!(full.stats().truncated_rows, 0);
    assert_eq!(&full.vertices()[..12], capped.vertices());
}

#[test]
fn degenerate_edges_propagate() {
    let config = ChunkConfig::reference(GridDims::cube(1)).with_threshold(0.0);
    let mesh = chunk(config, &signed_plane);
    assert_eq!(mesh.vertices().len(), 6);
    assert_eq!(mesh.stats().degenerate_edges, 4);
    assert!(mesh.vertices().iter().all(|v| v.position[0].is_infinite()));
    assert!(mesh.bounds().is_none());
}

#[test]
fn degenerate_edges_midpoint() {
    let config = ChunkConfig::default()
        .with_dims(GridDims::cube(1))
        .with_threshold(0.0);
    let mesh = chunk(config, &signed_plane);
    assert_eq!(mesh.stats().degenerate_edges, 4);
    assert!(mesh.vertices().iter().all(|v| v.position[0] == 0.5));
}

#[test]
fn degenerate_edges_fail() {
    let config = ChunkConfig::default()
        .with_dims(GridDims::cube(1))
        .with_threshold(0.0)
        .with_degenerate_edges(DegenerateEdgePolicy::Fail);
    let err = Chunk::new(config, &signed_plane).unwrap_err();
    assert_eq!(
        err,
        Error::DegenerateEdge {
            edge: 0,
            cell: CellPos::default()
        }
    );
}

#[test]
fn parallel_build_matches_sequential() {
    let field = TerrainField::with_seed(5);
    let config = ChunkConfig::default().with_dims(GridDims::new(24, 16, 8));
    let sequential = chunk(config.clone(), &field);
    let parallel = chunk(config.with_parallel(true), &field);
    assert_eq!(sequential.vertices(), parallel.vertices());
    assert_eq!(sequential.stats(), parallel.stats());
}

#[test]
fn cached_field_matches_direct_sampling() {
    let dims = GridDims::new(8, 14, 8);
    let cached = CachedField::new(TerrainField::with_seed(77));
    let direct = chunk(ChunkConfig::default().with_dims(dims), cached.inner());
    let memo = chunk(ChunkConfig::default().with_dims(dims), &cached);
    assert_eq!(direct.vertices(), memo.vertices());
    // every lattice point of the grid, evaluated once
    assert_eq!(cached.len(), 9 * 15 * 9);
}
