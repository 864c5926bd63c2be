//! Streaming configuration: detail levels and collider placement.

use serde::{Deserialize, Serialize};

use crate::constants::{COLLIDER_GENERATION_DISTANCE_THRESHOLD, VIEWER_MOVE_THRESHOLD_FOR_CHUNK_UPDATE};

/// One level of detail and the distance up to which it is used.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailLevel {
  /// Mesh LOD (0 = full resolution).
  pub lod: u32,
  /// Largest viewer-to-chunk distance (mesh units) this level covers.
  pub visible_dist_threshold: f32,
}

impl DetailLevel {
  pub const fn new(lod: u32, visible_dist_threshold: f32) -> Self {
    Self {
      lod,
      visible_dist_threshold,
    }
  }

  #[inline]
  pub fn sqr_visible_dist_threshold(&self) -> f32 {
    self.visible_dist_threshold * self.visible_dist_threshold
  }
}

/// Index of the detail level for a chunk `distance` away.
///
/// The smallest `i` with `distance <= levels[i].visible_dist_threshold`,
/// checking every level but the last; otherwise the last (coarsest) index.
pub fn select_lod_index(distance: f32, levels: &[DetailLevel]) -> usize {
  let last = levels.len().saturating_sub(1);
  levels[..last]
    .iter()
    .position(|level| distance <= level.visible_dist_threshold)
    .unwrap_or(last)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StreamerError {
  #[error("at least one detail level is required")]
  EmptyDetailLevels,

  #[error("detail level {index} threshold {threshold} does not exceed the previous threshold {previous}")]
  NonAscendingThresholds { index: usize, previous: f32, threshold: f32 },

  #[error("collider LOD index {index} is out of range for {len} detail levels")]
  ColliderLodOutOfRange { index: usize, len: usize },
}

/// Chunk streaming parameters. Distances are in mesh units (world units
/// divided by the terrain's uniform scale).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamerConfig {
  /// Ascending by threshold; the last threshold is the max view distance.
  pub detail_levels: Vec<DetailLevel>,
  /// Detail level whose mesh doubles as the physics collider.
  pub collider_lod_index: usize,
  /// Viewer travel that triggers a full chunk sweep.
  pub viewer_move_threshold: f32,
  /// Distance from a chunk's bounds within which its collider is attached.
  pub collider_generation_distance: f32,
  /// Drop hidden chunks farther than this many chunks from the viewer.
  /// `None` keeps every chunk for the whole session.
  pub evict_beyond_chunks: Option<u32>,
}

impl Default for StreamerConfig {
  fn default() -> Self {
    Self {
      detail_levels: vec![
        DetailLevel::new(0, 200.0),
        DetailLevel::new(1, 400.0),
        DetailLevel::new(4, 600.0),
      ],
      collider_lod_index: 0,
      viewer_move_threshold: VIEWER_MOVE_THRESHOLD_FOR_CHUNK_UPDATE,
      collider_generation_distance: COLLIDER_GENERATION_DISTANCE_THRESHOLD,
      evict_beyond_chunks: None,
    }
  }
}

impl StreamerConfig {
  pub fn with_detail_levels(mut self, levels: Vec<DetailLevel>) -> Self {
    self.detail_levels = levels;
    self
  }

  pub fn with_collider_lod_index(mut self, index: usize) -> Self {
    self.collider_lod_index = index;
    self
  }

  pub fn with_viewer_move_threshold(mut self, threshold: f32) -> Self {
    self.viewer_move_threshold = threshold;
    self
  }

  pub fn with_collider_generation_distance(mut self, distance: f32) -> Self {
    self.collider_generation_distance = distance;
    self
  }

  pub fn with_eviction(mut self, beyond_chunks: u32) -> Self {
    self.evict_beyond_chunks = Some(beyond_chunks);
    self
  }

  /// Threshold of the last detail level.
  pub fn max_view_distance(&self) -> f32 {
    self
      .detail_levels
      .last()
      .map_or(0.0, |level| level.visible_dist_threshold)
  }

  pub fn validate(&self) -> Result<(), StreamerError> {
    if self.detail_levels.is_empty() {
      return Err(StreamerError::EmptyDetailLevels);
    }

    for (index, pair) in self.detail_levels.windows(2).enumerate() {
      if pair[1].visible_dist_threshold <= pair[0].visible_dist_threshold {
        return Err(StreamerError::NonAscendingThresholds {
          index: index + 1,
          previous: pair[0].visible_dist_threshold,
          threshold: pair[1].visible_dist_threshold,
        });
      }
    }

    if self.collider_lod_index >= self.detail_levels.len() {
      return Err(StreamerError::ColliderLodOutOfRange {
        index: self.collider_lod_index,
        len: self.detail_levels.len(),
      });
    }

    Ok(())
  }
}
