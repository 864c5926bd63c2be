//! Heightfield to LOD mesh conversion.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  heightfield: N×N padded grid (chunk + 1-cell ring)             │
//! │  height_multiplier, height_curve, lod, flat_shading             │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 1: Slot Assignment                     │
//! │  Sample every `step` cells (step = 1 at LOD 0, else 2·lod),     │
//! │  always keeping the ring and both interior edges                │
//! │  Ring samples → Border(i), others → Interior(i), scan order     │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 2: Geometry                            │
//! │  Position = (centered x, curve(h)·multiplier, mirrored z)       │
//! │  Quad (a b / c d) → triangles (a,d,c), (d,a,b)                  │
//! │  Any border corner → border triangle list                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 3: Shading                             │
//! │  Smooth: accumulate face normals incl. border triangles         │
//! │  Flat:   one vertex per triangle corner, normals left to caller │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Coordinate System
//!
//! ```text
//!         +Y (height)
//!          │
//!          └───────── +X   (heightfield x)
//!         /
//!        /
//!       +Z                 (heightfield y runs toward -Z)
//! ```
//!
//! Smooth normals of an upward surface point toward +Y.
//!
//! A cell's position depends only on its heightfield coordinates, never on
//! the LOD: every mesh spans `[-(N-3)/2, (N-3)/2]` on X and Z, so edges of
//! neighboring chunks line up whatever detail level each one shows.

pub(crate) mod mesh_data;
mod vertex_slot;

pub use vertex_slot::VertexSlot;

use glam::{Vec2, Vec3};

use crate::constants::simplification_increment;
use crate::curve::HeightCurve;
use crate::types::{Heightfield, MeshArtifact};
use mesh_data::MeshData;
use vertex_slot::VertexSlotGrid;

/// Build a chunk mesh from a padded heightfield at the given LOD.
///
/// The padded field must be square. The rendered mesh excludes the padding
/// ring; at LOD 0 an `N×N` field yields `(N-2)²` vertices and `2·(N-3)²`
/// triangles. Coarser LODs sample every `step` cells plus the final interior
/// row and column.
#[tracing::instrument(level = "trace", skip(heightfield, height_curve), fields(size = heightfield.width()))]
pub fn build_terrain_mesh(
  heightfield: &Heightfield,
  height_multiplier: f32,
  height_curve: &HeightCurve,
  lod: u32,
  flat_shading: bool,
) -> MeshArtifact {
  assemble(heightfield, height_multiplier, height_curve, lod, flat_shading).process(lod)
}

/// Sample the heightfield and emit interior and border geometry, unshaded.
pub(crate) fn assemble(
  heightfield: &Heightfield,
  height_multiplier: f32,
  height_curve: &HeightCurve,
  lod: u32,
  flat_shading: bool,
) -> MeshData {
  debug_assert_eq!(heightfield.width(), heightfield.height(), "heightfield must be square");

  let step = simplification_increment(lod);
  let bordered_size = heightfield.width();
  // Interior cells 1..=N-2 span N-3 units centered on the origin at every LOD.
  let half_extent = bordered_size.saturating_sub(3) as f32 / 2.0;
  let uv_span = bordered_size.saturating_sub(2).max(1) as f32;

  let slots = VertexSlotGrid::new(bordered_size, step);
  let samples = slots.samples_per_line();
  let mut mesh_data = MeshData::new(slots.interior_count(), slots.border_count(), flat_shading);

  for sy in 0..samples {
    for sx in 0..samples {
      let (x, y) = (slots.cell(sx), slots.cell(sy));
      let slot = slots.get(sx, sy);

      let cell = Vec2::new(x as f32 - 1.0, y as f32 - 1.0);
      let percent = cell / uv_span;
      let height = height_curve.evaluate(heightfield.get(x, y)) * height_multiplier;
      let position = Vec3::new(cell.x - half_extent, height, half_extent - cell.y);

      mesh_data.add_vertex(position, percent, slot);

      // Quad corners: a b
      //               c d
      if sx + 1 < samples && sy + 1 < samples {
        let a = slot;
        let b = slots.get(sx + 1, sy);
        let c = slots.get(sx, sy + 1);
        let d = slots.get(sx + 1, sy + 1);
        mesh_data.add_triangle(a, d, c);
        mesh_data.add_triangle(d, a, b);
      }
    }
  }

  mesh_data
}
