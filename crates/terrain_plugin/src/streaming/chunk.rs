//! ChunkRecord - per-chunk streaming state.
//!
//! ```text
//!   Unrequested ──► MapPending ──► MapReady ──┬─► MeshPending(lod) ──► MeshReady(lod)
//!                                             └─► ... one slot per detail level
//! ```
//!
//! Each LOD slot is requested at most once and filled at most once. All
//! mutation happens on the consumer thread.

use std::sync::Arc;

use glam::{IVec2, Vec2};
use smallvec::SmallVec;
use tracing::trace;

use super::config::{select_lod_index, StreamerConfig};
use crate::bounds::Aabb2;
use crate::presentation::ChunkPresenter;
use crate::scheduler::GenerationScheduler;
use crate::types::{MapArtifact, MeshArtifact};

/// Mesh slot for one detail level.
#[derive(Clone, Debug)]
pub(crate) struct LodSlot {
  pub(crate) lod: u32,
  pub(crate) requested: bool,
  pub(crate) mesh: Option<Arc<MeshArtifact>>,
}

impl LodSlot {
  fn new(lod: u32) -> Self {
    Self {
      lod,
      requested: false,
      mesh: None,
    }
  }
}

/// Streaming state of one chunk.
#[derive(Clone, Debug)]
pub struct ChunkRecord {
  coord: IVec2,
  /// Center in mesh units.
  position: Vec2,
  bounds: Aabb2,
  map: Option<Arc<MapArtifact>>,
  map_requested: bool,
  lod_slots: SmallVec<[LodSlot; 8]>,
  visible: bool,
  applied_lod_index: Option<usize>,
  has_collider: bool,
}

impl ChunkRecord {
  pub(crate) fn new(coord: IVec2, chunk_size: f32, config: &StreamerConfig) -> Self {
    let position = coord.as_vec2() * chunk_size;
    Self {
      coord,
      position,
      bounds: Aabb2::from_center_size(position, chunk_size),
      map: None,
      map_requested: false,
      lod_slots: config
        .detail_levels
        .iter()
        .map(|level| LodSlot::new(level.lod))
        .collect(),
      visible: false,
      applied_lod_index: None,
      has_collider: false,
    }
  }

  pub fn coord(&self) -> IVec2 {
    self.coord
  }

  pub fn position(&self) -> Vec2 {
    self.position
  }

  pub fn bounds(&self) -> Aabb2 {
    self.bounds
  }

  pub fn map(&self) -> Option<&Arc<MapArtifact>> {
    self.map.as_ref()
  }

  pub fn is_visible(&self) -> bool {
    self.visible
  }

  /// Detail level whose mesh is currently shown, `None` before the first one.
  pub fn applied_lod_index(&self) -> Option<usize> {
    self.applied_lod_index
  }

  pub fn has_collider(&self) -> bool {
    self.has_collider
  }

  pub fn has_mesh(&self, lod_index: usize) -> bool {
    self
      .lod_slots
      .get(lod_index)
      .is_some_and(|slot| slot.mesh.is_some())
  }

  pub fn mesh(&self, lod_index: usize) -> Option<&Arc<MeshArtifact>> {
    self.lod_slots.get(lod_index)?.mesh.as_ref()
  }

  /// Number of LOD slots holding a mesh.
  pub fn mesh_count(&self) -> usize {
    self.lod_slots.iter().filter(|slot| slot.mesh.is_some()).count()
  }

  /// Some request for this chunk has not been delivered yet.
  pub fn has_pending_requests(&self) -> bool {
    (self.map_requested && self.map.is_none())
      || self
        .lod_slots
        .iter()
        .any(|slot| slot.requested && slot.mesh.is_none())
  }

  pub(crate) fn request_map(&mut self, scheduler: &mut GenerationScheduler) {
    if self.map_requested {
      return;
    }
    self.map_requested = true;
    scheduler.request_map_data(self.coord, self.position);
  }

  /// Store a delivered map. A second delivery is ignored.
  pub(crate) fn receive_map(&mut self, map: Arc<MapArtifact>) -> bool {
    if self.map.is_some() {
      return false;
    }
    self.map = Some(map);
    true
  }

  /// Fill a LOD slot. A second delivery for the same slot is ignored.
  pub(crate) fn receive_mesh(&mut self, lod_index: usize, mesh: Arc<MeshArtifact>) -> bool {
    match self.lod_slots.get_mut(lod_index) {
      Some(slot) if slot.mesh.is_none() => {
        slot.mesh = Some(mesh);
        true
      }
      _ => false,
    }
  }

  fn request_mesh(&mut self, lod_index: usize, scheduler: &mut GenerationScheduler) {
    let Some(map) = &self.map else {
      return;
    };
    let Some(slot) = self.lod_slots.get_mut(lod_index) else {
      return;
    };
    if slot.requested {
      return;
    }
    slot.requested = true;
    scheduler.request_mesh_data(self.coord, Arc::clone(map), lod_index, slot.lod);
  }

  /// Re-evaluate visibility and detail level against the viewer.
  ///
  /// Returns the new visibility when it changed. Does nothing until the map
  /// has arrived.
  pub(crate) fn update(
    &mut self,
    viewer: Vec2,
    config: &StreamerConfig,
    scheduler: &mut GenerationScheduler,
    presenter: &mut impl ChunkPresenter,
  ) -> Option<bool> {
    self.map.as_ref()?;

    let distance = self.bounds.distance_to_point(viewer);
    let was_visible = self.visible;
    let visible = distance <= config.max_view_distance();

    if visible {
      let lod_index = select_lod_index(distance, &config.detail_levels);
      if self.applied_lod_index != Some(lod_index) {
        if let Some(mesh) = self.mesh(lod_index).cloned() {
          trace!(coord = ?self.coord, from = ?self.applied_lod_index, to = lod_index, "lod switched");
          self.applied_lod_index = Some(lod_index);
          presenter.on_mesh_applied(self.coord, lod_index, mesh.lod, &mesh);
        } else {
          self.request_mesh(lod_index, scheduler);
        }
      }
    }

    if was_visible == visible {
      return None;
    }
    self.visible = visible;
    presenter.on_visibility_changed(self.coord, visible);
    Some(visible)
  }

  /// Request the collider mesh once the viewer is inside the collider LOD's
  /// range, and attach it once the viewer is within the generation distance.
  pub(crate) fn update_collision(
    &mut self,
    viewer: Vec2,
    config: &StreamerConfig,
    scheduler: &mut GenerationScheduler,
    presenter: &mut impl ChunkPresenter,
  ) {
    if self.has_collider || self.map.is_none() {
      return;
    }

    let index = config.collider_lod_index;
    let Some(level) = config.detail_levels.get(index) else {
      return;
    };
    let sqr_distance = self.bounds.sqr_distance_to_point(viewer);

    if sqr_distance < level.sqr_visible_dist_threshold() {
      self.request_mesh(index, scheduler);
    }

    let attach_distance = config.collider_generation_distance;
    if sqr_distance < attach_distance * attach_distance {
      if let Some(mesh) = self.mesh(index).cloned() {
        trace!(coord = ?self.coord, "collider attached");
        self.has_collider = true;
        presenter.on_collider_attached(self.coord, &mesh);
      }
    }
  }
}
