//! Chunk meshing throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use isomesh_core::GridDims;
use isomesh_world::{CachedField, Chunk, ChunkConfig, SphereField, TerrainField};

fn bench_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("sphere");
    for size in [16u32, 32] {
        let half = size as f32 * 0.5;
        let field = SphereField::new(Vec3::splat(half), half - 2.0);
        let config = ChunkConfig::default().with_dims(GridDims::cube(size));
        group.bench_with_input(BenchmarkId::new("sequential", size), &config, |b, config| {
            b.iter(|| Chunk::new(black_box(config.clone()), &field))
        });
        let parallel = config.with_parallel(true);
        group.bench_with_input(BenchmarkId::new("parallel", size), &parallel, |b, config| {
            b.iter(|| Chunk::new(black_box(config.clone()), &field))
        });
    }
    group.finish();
}

fn bench_terrain(c: &mut Criterion) {
    let config = ChunkConfig::default().with_dims(GridDims::new(32, 24, 32));
    let field = TerrainField::with_seed(12345);

    c.bench_function("terrain 32x24x32", |b| {
        b.iter(|| Chunk::new(black_box(config.clone()), &field))
    });

    c.bench_function("terrain 32x24x32 cached", |b| {
        b.iter(|| {
            let cached = CachedField::new(TerrainField::with_seed(12345));
            Chunk::new(black_box(config.clone()), &cached)
        })
    });
}

criterion_group!(benches, bench_sphere, bench_terrain);
criterion_main!(benches);
