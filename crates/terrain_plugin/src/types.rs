//! Core data types shared between generation, meshing and streaming.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Linear RGBA color with components in [0, 1].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
  pub r: f32,
  pub g: f32,
  pub b: f32,
  pub a: f32,
}

impl Color {
  /// Fully transparent black, used when no region matches.
  pub const CLEAR: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
  pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
  pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

  pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
    Self { r, g, b, a }
  }

  pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
    Self::rgba(r, g, b, 1.0)
  }

  /// Grey level with full alpha.
  pub fn grey(value: f32) -> Self {
    Self::rgb(value, value, value)
  }

  /// Quantize to 8-bit RGBA.
  pub fn to_rgba8(self) -> [u8; 4] {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(self.r), q(self.g), q(self.b), q(self.a)]
  }
}

/// Height band used to color the terrain.
///
/// Regions are evaluated in authored order; see [`crate::coloring::classify`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
  /// Display name (editor only).
  #[serde(default)]
  pub name: String,
  /// Normalized height at which this band starts.
  pub height: f32,
  pub color: Color,
}

impl Region {
  pub fn new(name: impl Into<String>, height: f32, color: Color) -> Self {
    Self {
      name: name.into(),
      height,
      color,
    }
  }
}

/// Row-major 2D grid of normalized heights.
///
/// Chunk heightfields are `map_chunk_size + 2` on each side; the outer ring
/// gives mesh normals neighbor context at chunk seams.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
  width: usize,
  height: usize,
  values: Vec<f32>,
}

impl Heightfield {
  /// Zero-filled heightfield.
  pub fn new(width: usize, height: usize) -> Self {
    Self {
      width,
      height,
      values: vec![0.0; width * height],
    }
  }

  /// Build from a per-cell function `f(x, y)`.
  pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
    let mut values = Vec::with_capacity(width * height);
    for y in 0..height {
      for x in 0..width {
        values.push(f(x, y));
      }
    }
    Self {
      width,
      height,
      values,
    }
  }

  #[inline]
  pub fn width(&self) -> usize {
    self.width
  }

  #[inline]
  pub fn height(&self) -> usize {
    self.height
  }

  #[inline]
  pub fn get(&self, x: usize, y: usize) -> f32 {
    self.values[y * self.width + x]
  }

  /// Raw values, row-major (`y * width + x`).
  pub fn values(&self) -> &[f32] {
    &self.values
  }

  pub(crate) fn values_mut(&mut self) -> &mut [f32] {
    &mut self.values
  }

  /// Smallest and largest value, `None` when empty.
  pub fn min_max(&self) -> Option<(f32, f32)> {
    if self.values.is_empty() {
      return None;
    }
    let (min, max) = self
      .values
      .iter()
      .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    Some((min, max))
  }
}

/// One color per interior heightfield cell, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
  pub size: usize,
  pub colors: Vec<Color>,
}

impl ColorMap {
  #[inline]
  pub fn get(&self, x: usize, y: usize) -> Color {
    self.colors[y * self.size + x]
  }
}

/// Heightfield and color map for one chunk.
///
/// Generated once per chunk position and shared read-only by every LOD mesh
/// build for that chunk.
#[derive(Clone, Debug)]
pub struct MapArtifact {
  pub heightfield: Heightfield,
  pub color_map: ColorMap,
}

/// Normal data carried by a mesh.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshNormals {
  /// Per-vertex normals, border-stitched (smooth shading).
  Baked(Vec<[f32; 3]>),
  /// Vertices are unshared per triangle; the consumer must compute face
  /// normals (see [`MeshArtifact::compute_flat_normals`]).
  RecalculateFlat,
}

/// Renderable mesh for one chunk at one LOD.
#[derive(Clone, Debug)]
pub struct MeshArtifact {
  /// LOD this mesh was built at.
  pub lod: u32,
  /// Vertex positions in chunk-local mesh units, centered on the chunk.
  pub positions: Vec<[f32; 3]>,
  /// Texture coordinates (fraction across the chunk).
  pub uvs: Vec<[f32; 2]>,
  /// Triangle indices (3 per triangle).
  pub indices: Vec<u32>,
  pub normals: MeshNormals,
}

impl MeshArtifact {
  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  #[inline]
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  pub fn is_flat_shaded(&self) -> bool {
    matches!(self.normals, MeshNormals::RecalculateFlat)
  }

  /// Lowest and highest vertex Y, `None` for an empty mesh.
  pub fn height_range(&self) -> Option<(f32, f32)> {
    if self.positions.is_empty() {
      return None;
    }
    let (min, max) = self
      .positions
      .iter()
      .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p[1]), hi.max(p[1])));
    Some((min, max))
  }

  /// Per-vertex face normals, assigning each triangle's normal to its corners.
  ///
  /// Intended for flat-shaded meshes where no vertex is shared; for shared
  /// vertices the last triangle written wins.
  pub fn compute_flat_normals(&self) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0, 1.0, 0.0]; self.positions.len()];
    for tri in self.indices.chunks_exact(3) {
      let a = Vec3::from(self.positions[tri[0] as usize]);
      let b = Vec3::from(self.positions[tri[1] as usize]);
      let c = Vec3::from(self.positions[tri[2] as usize]);
      let n = (b - a).cross(c - a).normalize_or_zero().to_array();
      for &i in tri {
        normals[i as usize] = n;
      }
    }
    normals
  }

  /// Normals ready for upload: baked normals, or face normals for flat meshes.
  pub fn resolved_normals(&self) -> Vec<[f32; 3]> {
    match &self.normals {
      MeshNormals::Baked(normals) => normals.clone(),
      MeshNormals::RecalculateFlat => self.compute_flat_normals(),
    }
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
