//! Fixed sizes and thresholds shared by generation and streaming.
//!
//! # Chunk Layout
//!
//! ```text
//! Padded heightfield (MAP_CHUNK_SIZE + 2 per side):
//!
//!   B B B B B B B       B = border ring, normals only
//!   B . . . . . B       . = rendered vertices
//!   B . . . . . B
//!   B . . . . . B       rendered span = MAP_CHUNK_SIZE - 1 units
//!   B B B B B B B
//! ```
//!
//! Vertex counts stay within 16-bit index buffers: 239² < 65536 for smooth
//! meshes. Flat shading triples the vertex count, so its chunk is smaller.

/// Vertices per side of a smooth-shaded LOD 0 chunk.
pub const MAP_CHUNK_SIZE: usize = 239;

/// Vertices per side of a flat-shaded LOD 0 chunk.
pub const MAP_CHUNK_SIZE_FLAT_SHADED: usize = 95;

/// Padding ring added on every side of a chunk heightfield.
pub const BORDER_PADDING: usize = 1;

/// Highest LOD accepted by the mesh builder (step 12).
pub const MAX_LOD: u32 = 6;

/// Viewer movement (mesh units) before the chunk grid is rescanned.
pub const VIEWER_MOVE_THRESHOLD_FOR_CHUNK_UPDATE: f32 = 25.0;

/// Distance from a chunk's bounds at which its collider is attached.
pub const COLLIDER_GENERATION_DISTANCE_THRESHOLD: f32 = 5.0;

/// Vertices per chunk side for the given shading mode.
#[inline]
pub fn map_chunk_size(flat_shading: bool) -> usize {
  if flat_shading {
    MAP_CHUNK_SIZE_FLAT_SHADED
  } else {
    MAP_CHUNK_SIZE
  }
}

/// Heightfield side length including the padding ring.
#[inline]
pub fn padded_size(map_chunk_size: usize) -> usize {
  map_chunk_size + 2 * BORDER_PADDING
}

/// Sample stride for a LOD: 1 at LOD 0, `2 * lod` otherwise.
#[inline]
pub fn simplification_increment(lod: u32) -> usize {
  if lod == 0 {
    1
  } else {
    2 * lod.min(MAX_LOD) as usize
  }
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
