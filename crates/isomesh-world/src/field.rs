//! Scalar fields sampled at integer grid coordinates.

use glam::Vec3;
use hashbrown::HashMap;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::WorldSeed;

/// A density function over the integer lattice.
///
/// Implementations must be pure: the same coordinates always yield the same
/// value. The mesher samples every corner of every cell, so corners shared
/// between neighbours are requested more than once.
pub trait ScalarField: Send + Sync {
    /// Sample the field at grid coordinates.
    fn sample(&self, x: i32, y: i32, z: i32) -> f32;
}

impl<F> ScalarField for F
where
    F: Fn(i32, i32, i32) -> f32 + Send + Sync,
{
    #[inline]
    fn sample(&self, x: i32, y: i32, z: i32) -> f32 {
        self(x, y, z)
    }
}

/// Placeholder generator: `1.0` on the plane `x == 0`, `0.0` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneField;

impl ScalarField for PlaneField {
    #[inline]
    fn sample(&self, x: i32, _y: i32, _z: i32) -> f32 {
        if x == 0 {
            1.0
        } else {
            0.0
        }
    }
}

/// Solid ball: `1.0` within `radius` of `center`, `0.0` outside.
#[derive(Debug, Clone, Copy)]
pub struct SphereField {
    pub center: Vec3,
    pub radius: f32,
}

impl SphereField {
    /// Create a new sphere field.
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl ScalarField for SphereField {
    fn sample(&self, x: i32, y: i32, z: i32) -> f32 {
        let p = Vec3::new(x as f32, y as f32, z as f32);
        if p.distance_squared(self.center) <= self.radius * self.radius {
            1.0
        } else {
            0.0
        }
    }
}

/// Terrain field configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Seed for noise generation.
    pub seed: WorldSeed,
    /// Lowest surface height (Y coordinate).
    pub base_height: i32,
    /// Horizontal scale of terrain features.
    pub terrain_scale: f64,
    /// Maximum terrain height variation.
    pub terrain_height: f64,
    /// Number of noise octaves for detail.
    pub octaves: usize,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            base_height: 4,
            terrain_scale: 24.0,
            terrain_height: 8.0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

/// Heightmap terrain from fractal noise: `1.0` at or below the surface.
pub struct TerrainField {
    config: TerrainConfig,
    height_noise: Fbm<Perlin>,
}

impl TerrainField {
    /// Create a new terrain field with the given configuration.
    pub fn new(config: TerrainConfig) -> Self {
        let height_noise = Fbm::<Perlin>::new(config.seed as u32)
            .set_octaves(config.octaves)
            .set_lacunarity(config.lacunarity)
            .set_persistence(config.persistence);

        Self {
            config,
            height_noise,
        }
    }

    /// Create a terrain field with default configuration.
    pub fn with_seed(seed: WorldSeed) -> Self {
        Self::new(TerrainConfig {
            seed,
            ..Default::default()
        })
    }

    /// Get the terrain configuration.
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Surface height at grid XZ coordinates.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let nx = f64::from(x) / self.config.terrain_scale;
        let nz = f64::from(z) / self.config.terrain_scale;

        // Noise returns [-1, 1], map to [0, terrain_height] and add base_height
        let noise_value = self.height_noise.get([nx, nz]);
        ((noise_value + 1.0) * 0.5 * self.config.terrain_height) as i32 + self.config.base_height
    }
}

impl ScalarField for TerrainField {
    fn sample(&self, x: i32, y: i32, z: i32) -> f32 {
        if y <= self.height_at(x, z) {
            1.0
        } else {
            0.0
        }
    }
}

/// Memoizes another field so each lattice point is evaluated once.
pub struct CachedField<F> {
    inner: F,
    cache: Mutex<HashMap<[i32; 3], f32>>,
}

impl<F: ScalarField> CachedField<F> {
    /// Wrap a field.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct points evaluated so far.
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// True if nothing has been sampled yet.
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Drop all cached samples.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    /// The wrapped field.
    pub const fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: ScalarField> ScalarField for CachedField<F> {
    fn sample(&self, x: i32, y: i32, z: i32) -> f32 {
        *self
            .cache
            .lock()
            .entry([x, y, z])
            .or_insert_with(|| self.inner.sample(x, y, z))
    }
}
