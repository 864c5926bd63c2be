//! Chunk streaming around a moving viewer.
//!
//! # Per-tick flow
//!
//! ```text
//! update(viewer)
//!   │
//!   ├─ 1. drain scheduler ──► map: store, re-evaluate chunk
//!   │                        mesh: fill slot, re-evaluate chunk (+ collider)
//!   ├─ 2. viewer moved since last sweep? ──► collision check on visible chunks
//!   ├─ 3. re-evaluate every visible chunk (hides chunks that left view range)
//!   ├─ 4. moved > threshold since last sweep? ──► sweep (2r+1)² coords
//!   │                                             create + request new chunks
//!   └─ 5. optional eviction of distant hidden chunks
//! ```
//!
//! # Coordinates
//!
//! Chunk `c` is centered at `c * chunk_size` mesh units, where `chunk_size`
//! is one less than the chunk's vertex count per side, so neighboring meshes
//! share their edge vertices. Scene positions multiply by the terrain's
//! uniform scale; the viewer is divided by it on the way in.

mod chunk;
mod config;
mod viewer;

use std::collections::HashMap;
use std::sync::Arc;

use glam::{IVec2, Vec2, Vec3};
use tracing::{debug, trace};

pub use chunk::ChunkRecord;
pub use config::{select_lod_index, DetailLevel, StreamerConfig, StreamerError};
pub use viewer::ViewerState;

use crate::presentation::ChunkPresenter;
use crate::scheduler::{GenerationScheduler, MapCompletion, MeshCompletion};

/// Snapshot of streamer state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StreamerStats {
  pub tracked_chunks: usize,
  pub visible_chunks: usize,
  pub colliders_attached: usize,
  /// Requests issued whose results have not been delivered.
  pub pending_requests: usize,
  pub maps_generated: u64,
  pub meshes_generated: u64,
  pub avg_map_us: f64,
  pub avg_mesh_us: f64,
}

/// Owns every chunk record and drives generation around the viewer.
pub struct ChunkStreamer {
  config: StreamerConfig,
  scheduler: GenerationScheduler,
  chunks: HashMap<IVec2, ChunkRecord>,
  /// Coordinates of visible chunks, each listed once.
  visible: Vec<IVec2>,
  viewer: ViewerState,
  chunk_size: f32,
  uniform_scale: f32,
  /// Sweep radius in chunks.
  chunks_visible_in_view_dist: i32,
}

impl ChunkStreamer {
  pub fn new(config: StreamerConfig, scheduler: GenerationScheduler) -> Result<Self, StreamerError> {
    config.validate()?;

    let terrain = scheduler.generator().terrain();
    let chunk_size = terrain.chunk_world_size();
    let uniform_scale = terrain.uniform_scale;
    let chunks_visible_in_view_dist = (config.max_view_distance() / chunk_size).round() as i32;

    debug!(
      chunk_size,
      uniform_scale,
      radius = chunks_visible_in_view_dist,
      levels = config.detail_levels.len(),
      "chunk streamer created"
    );

    Ok(Self {
      config,
      scheduler,
      chunks: HashMap::new(),
      visible: Vec::new(),
      viewer: ViewerState::default(),
      chunk_size,
      uniform_scale,
      chunks_visible_in_view_dist,
    })
  }

  /// Advance one tick with the viewer at `viewer_world` (scene units).
  pub fn update(&mut self, viewer_world: Vec3, presenter: &mut impl ChunkPresenter) {
    self.viewer.position = ViewerState::project(viewer_world, self.uniform_scale);

    self.deliver_completions(presenter);

    if self.viewer.moved_since_sweep() {
      for coord in self.visible.clone() {
        self.update_chunk_collision(coord, presenter);
      }
    }

    for coord in self.visible.clone() {
      self.update_chunk(coord, presenter);
    }

    if self.viewer.needs_sweep(self.config.viewer_move_threshold) {
      self.viewer.mark_swept();
      self.sweep(presenter);
      if let Some(radius) = self.config.evict_beyond_chunks {
        self.evict(radius, presenter);
      }
    }
  }

  fn deliver_completions(&mut self, presenter: &mut impl ChunkPresenter) {
    let mut maps = Vec::new();
    let mut meshes = Vec::new();
    self.scheduler.drain(|m| maps.push(m), |m| meshes.push(m));

    for MapCompletion { coord, map, .. } in maps {
      let Some(chunk) = self.chunks.get_mut(&coord) else {
        trace!(?coord, "map for untracked chunk dropped");
        continue;
      };
      if !chunk.receive_map(Arc::clone(&map)) {
        continue;
      }
      let world_position = chunk.position() * self.uniform_scale;
      presenter.on_map_ready(coord, world_position, &map);
      self.update_chunk(coord, presenter);
      self.update_chunk_collision(coord, presenter);
    }

    for MeshCompletion {
      coord, lod_index, mesh, ..
    } in meshes
    {
      let Some(chunk) = self.chunks.get_mut(&coord) else {
        trace!(?coord, lod_index, "mesh for untracked chunk dropped");
        continue;
      };
      if !chunk.receive_mesh(lod_index, mesh) {
        continue;
      }
      self.update_chunk(coord, presenter);
      if lod_index == self.config.collider_lod_index {
        self.update_chunk_collision(coord, presenter);
      }
    }
  }

  /// Re-evaluate one chunk and keep the visible list in step with it.
  fn update_chunk(&mut self, coord: IVec2, presenter: &mut impl ChunkPresenter) {
    let Some(chunk) = self.chunks.get_mut(&coord) else {
      return;
    };
    match chunk.update(self.viewer.position, &self.config, &mut self.scheduler, presenter) {
      Some(true) => self.visible.push(coord),
      Some(false) => self.visible.retain(|c| *c != coord),
      None => {}
    }
  }

  fn update_chunk_collision(&mut self, coord: IVec2, presenter: &mut impl ChunkPresenter) {
    if let Some(chunk) = self.chunks.get_mut(&coord) {
      chunk.update_collision(self.viewer.position, &self.config, &mut self.scheduler, presenter);
    }
  }

  /// Chunk coordinate containing `position` (mesh units).
  fn chunk_coord_of(&self, position: Vec2) -> IVec2 {
    (position / self.chunk_size).round().as_ivec2()
  }

  /// Touch every coordinate within the view radius: update known chunks,
  /// create and request the rest.
  fn sweep(&mut self, presenter: &mut impl ChunkPresenter) {
    let center = self.chunk_coord_of(self.viewer.position);
    let radius = self.chunks_visible_in_view_dist;
    let mut created = 0usize;

    for y in -radius..=radius {
      for x in -radius..=radius {
        let coord = center + IVec2::new(x, y);
        if self.chunks.contains_key(&coord) {
          self.update_chunk(coord, presenter);
        } else {
          let mut chunk = ChunkRecord::new(coord, self.chunk_size, &self.config);
          chunk.request_map(&mut self.scheduler);
          self.chunks.insert(coord, chunk);
          created += 1;
        }
      }
    }

    debug!(
      ?center,
      created,
      tracked = self.chunks.len(),
      visible = self.visible.len(),
      "chunk sweep"
    );
  }

  /// Drop hidden chunks more than `radius` chunks from the viewer. Chunks
  /// still waiting on a request are kept so no slot is ever requested twice.
  fn evict(&mut self, radius: u32, presenter: &mut impl ChunkPresenter) {
    let center = self.chunk_coord_of(self.viewer.position);
    let radius = radius as i32;

    let doomed: Vec<IVec2> = self
      .chunks
      .values()
      .filter(|chunk| {
        let offset = (chunk.coord() - center).abs();
        offset.max_element() > radius && !chunk.is_visible() && !chunk.has_pending_requests()
      })
      .map(ChunkRecord::coord)
      .collect();

    for coord in &doomed {
      self.chunks.remove(coord);
      presenter.on_chunk_evicted(*coord);
    }
    if !doomed.is_empty() {
      debug!(evicted = doomed.len(), tracked = self.chunks.len(), "chunks evicted");
    }
  }

  pub fn config(&self) -> &StreamerConfig {
    &self.config
  }

  pub fn scheduler(&self) -> &GenerationScheduler {
    &self.scheduler
  }

  pub fn viewer(&self) -> &ViewerState {
    &self.viewer
  }

  pub fn chunk(&self, coord: IVec2) -> Option<&ChunkRecord> {
    self.chunks.get(&coord)
  }

  pub fn chunks(&self) -> impl Iterator<Item = &ChunkRecord> {
    self.chunks.values()
  }

  pub fn visible_chunks(&self) -> &[IVec2] {
    &self.visible
  }

  /// Side length of one chunk in mesh units.
  pub fn chunk_size(&self) -> f32 {
    self.chunk_size
  }

  pub fn stats(&self) -> StreamerStats {
    let metrics = self.scheduler.metrics();
    StreamerStats {
      tracked_chunks: self.chunks.len(),
      visible_chunks: self.visible.len(),
      colliders_attached: self.chunks.values().filter(|c| c.has_collider()).count(),
      pending_requests: self.scheduler.in_flight(),
      maps_generated: metrics.maps_generated,
      meshes_generated: metrics.meshes_generated,
      avg_map_us: metrics.avg_map_timing_us(),
      avg_mesh_us: metrics.avg_mesh_timing_us(),
    }
  }
}
