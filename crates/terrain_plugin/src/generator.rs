//! MapGenerator - pure chunk artifact production.
//!
//! ```text
//!   center ──► noise (padded N+2) ──► falloff? ──► Heightfield ──┬─► ColorMap
//!                                                               │
//!                                   MapArtifact ◄───────────────┘
//!                                        │
//!                          lod ──► build_terrain_mesh ──► MeshArtifact
//! ```
//!
//! Holds no mutable state, so one instance is shared by every worker thread.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::coloring::build_color_map;
use crate::constants::{map_chunk_size, padded_size};
use crate::curve::HeightCurve;
use crate::falloff::{apply_falloff, generate_falloff_map};
use crate::mesh::build_terrain_mesh;
use crate::noise::{generate_noise_map, NoiseConfig};
use crate::types::{MapArtifact, MeshArtifact, Region};

/// Terrain shaping and placement parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
  /// World units per mesh unit.
  pub uniform_scale: f32,
  /// Mesh height of a curve value of 1.0.
  pub height_multiplier: f32,
  pub height_curve: HeightCurve,
  pub flat_shading: bool,
  /// Subtract the island falloff mask from every chunk.
  pub apply_falloff: bool,
  /// Overrides the shading-derived chunk size (vertices per side, at least 2).
  pub chunk_size: Option<usize>,
}

impl Default for TerrainConfig {
  fn default() -> Self {
    Self {
      uniform_scale: 2.5,
      height_multiplier: 30.0,
      height_curve: HeightCurve::default(),
      flat_shading: false,
      apply_falloff: false,
      chunk_size: None,
    }
  }
}

impl TerrainConfig {
  pub fn with_uniform_scale(mut self, scale: f32) -> Self {
    self.uniform_scale = scale;
    self
  }

  pub fn with_height_multiplier(mut self, multiplier: f32) -> Self {
    self.height_multiplier = multiplier;
    self
  }

  pub fn with_height_curve(mut self, curve: HeightCurve) -> Self {
    self.height_curve = curve;
    self
  }

  pub fn with_flat_shading(mut self, flat: bool) -> Self {
    self.flat_shading = flat;
    self
  }

  pub fn with_falloff(mut self, enabled: bool) -> Self {
    self.apply_falloff = enabled;
    self
  }

  pub fn with_chunk_size(mut self, size: usize) -> Self {
    self.chunk_size = Some(size);
    self
  }

  /// Vertices per chunk side: 95 flat shaded, 239 smooth, unless overridden.
  pub fn map_chunk_size(&self) -> usize {
    self
      .chunk_size
      .map_or_else(|| map_chunk_size(self.flat_shading), |size| size.max(2))
  }

  /// Side length of one chunk in mesh units (one less than its vertex count).
  pub fn chunk_world_size(&self) -> f32 {
    (self.map_chunk_size() - 1) as f32
  }

  /// Lowest world-space height a vertex can reach.
  pub fn min_height(&self) -> f32 {
    self.uniform_scale * self.height_multiplier * self.height_curve.evaluate(0.0)
  }

  /// Highest world-space height a vertex can reach.
  pub fn max_height(&self) -> f32 {
    self.uniform_scale * self.height_multiplier * self.height_curve.max_value()
  }
}

/// Everything a [`MapGenerator`] needs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
  pub noise: NoiseConfig,
  pub terrain: TerrainConfig,
  /// Height bands in ascending threshold order.
  pub regions: Vec<Region>,
}

/// Produces map and mesh artifacts for chunks.
#[derive(Clone, Debug)]
pub struct MapGenerator {
  settings: TerrainSettings,
}

impl MapGenerator {
  /// Create a generator. Out-of-range noise parameters are clamped.
  pub fn new(mut settings: TerrainSettings) -> Self {
    settings.noise = settings.noise.validated();
    Self { settings }
  }

  pub fn settings(&self) -> &TerrainSettings {
    &self.settings
  }

  pub fn terrain(&self) -> &TerrainConfig {
    &self.settings.terrain
  }

  #[inline]
  pub fn map_chunk_size(&self) -> usize {
    self.settings.terrain.map_chunk_size()
  }

  /// Heightfield and color map for the chunk centered at `center` (mesh units).
  #[tracing::instrument(level = "trace", skip(self))]
  pub fn generate_map_data(&self, center: Vec2) -> MapArtifact {
    let size = self.map_chunk_size();
    let padded = padded_size(size);

    let mut heightfield = generate_noise_map(padded, padded, &self.settings.noise, center);
    if self.settings.terrain.apply_falloff {
      apply_falloff(&mut heightfield, &generate_falloff_map(padded));
    }

    let color_map = build_color_map(&heightfield, &self.settings.regions, size);
    MapArtifact {
      heightfield,
      color_map,
    }
  }

  /// Mesh for `map` at `lod`.
  pub fn generate_mesh_data(&self, map: &MapArtifact, lod: u32) -> MeshArtifact {
    let terrain = &self.settings.terrain;
    build_terrain_mesh(
      &map.heightfield,
      terrain.height_multiplier,
      &terrain.height_curve,
      lod,
      terrain.flat_shading,
    )
  }
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod generator_test;
