//! ChunkPresenter - callback interface for engine bridges.
//!
//! The streamer reports chunk lifecycle events through this trait so the core
//! never depends on a renderer or physics engine. All callbacks run on the
//! thread that calls [`ChunkStreamer::update`](crate::streaming::ChunkStreamer::update).

use std::sync::Arc;

use glam::{IVec2, Vec2};

use crate::types::{MapArtifact, MeshArtifact};

/// Receives chunk lifecycle events.
///
/// # Example
///
/// ```ignore
/// struct SceneBridge { scene: Scene }
///
/// impl ChunkPresenter for SceneBridge {
///     fn on_mesh_applied(&mut self, coord: IVec2, _lod_index: usize, _lod: u32,
///                        mesh: &Arc<MeshArtifact>) {
///         self.scene.set_mesh(coord, mesh.clone());
///     }
///     // ...
/// }
/// ```
pub trait ChunkPresenter {
  /// A chunk's map artifact arrived. `world_position` is the chunk center in
  /// scene units (already multiplied by the uniform scale).
  fn on_map_ready(&mut self, coord: IVec2, world_position: Vec2, map: &Arc<MapArtifact>);

  /// A chunk became visible or hidden.
  fn on_visibility_changed(&mut self, coord: IVec2, visible: bool);

  /// The chunk's rendered mesh switched to detail level `lod_index`.
  fn on_mesh_applied(&mut self, coord: IVec2, lod_index: usize, lod: u32, mesh: &Arc<MeshArtifact>);

  /// The collider mesh was attached. Fires at most once per chunk.
  fn on_collider_attached(&mut self, coord: IVec2, mesh: &Arc<MeshArtifact>);

  /// The chunk was dropped from the streamer.
  fn on_chunk_evicted(&mut self, _coord: IVec2) {}
}

/// No-op implementation for testing and headless operation.
pub struct NullPresenter;

impl ChunkPresenter for NullPresenter {
  fn on_map_ready(&mut self, _coord: IVec2, _world_position: Vec2, _map: &Arc<MapArtifact>) {
    // No-op
  }

  fn on_visibility_changed(&mut self, _coord: IVec2, _visible: bool) {
    // No-op
  }

  fn on_mesh_applied(&mut self, _coord: IVec2, _lod_index: usize, _lod: u32, _mesh: &Arc<MeshArtifact>) {
    // No-op
  }

  fn on_collider_attached(&mut self, _coord: IVec2, _mesh: &Arc<MeshArtifact>) {
    // No-op
  }
}
