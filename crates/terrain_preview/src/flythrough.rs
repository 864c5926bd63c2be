//! Scripted viewer path through a streaming world.

use std::sync::Arc;
use std::time::Duration;

use glam::{IVec2, Vec2, Vec3};
use terrain_plugin::{ChunkPresenter, ChunkStreamer, MapArtifact, MeshArtifact};
use tracing::info;
use web_time::Instant;

/// Counts presenter events instead of drawing anything.
#[derive(Debug, Default)]
pub struct EventCounter {
  pub maps: usize,
  pub shown: usize,
  pub hidden: usize,
  pub lod_switches: usize,
  pub colliders: usize,
  pub evicted: usize,
  /// Triangles in the most recently applied mesh per chunk.
  pub applied_triangles: std::collections::HashMap<IVec2, usize>,
}

impl EventCounter {
  pub fn visible_triangles(&self) -> usize {
    self.applied_triangles.values().sum()
  }
}

impl ChunkPresenter for EventCounter {
  fn on_map_ready(&mut self, _coord: IVec2, _world_position: Vec2, _map: &Arc<MapArtifact>) {
    self.maps += 1;
  }

  fn on_visibility_changed(&mut self, coord: IVec2, visible: bool) {
    if visible {
      self.shown += 1;
    } else {
      self.hidden += 1;
      self.applied_triangles.remove(&coord);
    }
  }

  fn on_mesh_applied(&mut self, coord: IVec2, _lod_index: usize, _lod: u32, mesh: &Arc<MeshArtifact>) {
    self.lod_switches += 1;
    self.applied_triangles.insert(coord, mesh.triangle_count());
  }

  fn on_collider_attached(&mut self, _coord: IVec2, _mesh: &Arc<MeshArtifact>) {
    self.colliders += 1;
  }

  fn on_chunk_evicted(&mut self, coord: IVec2) {
    self.evicted += 1;
    self.applied_triangles.remove(&coord);
  }
}

/// Viewer moving along +X at `speed` scene units per tick, ground level.
pub fn viewer_at(tick: u32, speed: f32) -> Vec3 {
  Vec3::new(tick as f32 * speed, 0.0, 0.0)
}

/// Run `ticks` updates at `tick_interval`, logging stats every `log_every`
/// ticks, then keep ticking in place until generation settles.
pub fn run(
  streamer: &mut ChunkStreamer,
  ticks: u32,
  speed: f32,
  tick_interval: Duration,
  log_every: u32,
) -> EventCounter {
  let mut events = EventCounter::default();
  let start = Instant::now();

  for tick in 0..ticks {
    streamer.update(viewer_at(tick, speed), &mut events);
    if log_every > 0 && tick % log_every == 0 {
      log_stats(tick, streamer, &events);
    }
    std::thread::sleep(tick_interval);
  }

  let final_viewer = viewer_at(ticks.saturating_sub(1), speed);
  while streamer.stats().pending_requests > 0 {
    streamer.update(final_viewer, &mut events);
    std::thread::sleep(tick_interval);
  }
  streamer.update(final_viewer, &mut events);

  log_stats(ticks, streamer, &events);
  info!(elapsed_ms = start.elapsed().as_millis() as u64, "fly-through finished");
  events
}

fn log_stats(tick: u32, streamer: &ChunkStreamer, events: &EventCounter) {
  let stats = streamer.stats();
  info!(
    tick,
    viewer = ?streamer.viewer().position,
    tracked = stats.tracked_chunks,
    visible = stats.visible_chunks,
    pending = stats.pending_requests,
    colliders = stats.colliders_attached,
    maps = stats.maps_generated,
    meshes = stats.meshes_generated,
    avg_map_us = stats.avg_map_us as u64,
    avg_mesh_us = stats.avg_mesh_us as u64,
    triangles = events.visible_triangles(),
    "stream stats"
  );
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_viewer_path() {
    assert_eq!(viewer_at(0, 3.0), Vec3::ZERO);
    assert_eq!(viewer_at(10, 3.0), Vec3::new(30.0, 0.0, 0.0));
  }

  #[test]
  fn test_counter_tracks_visible_triangles() {
    use terrain_plugin::MeshNormals;

    let mesh = Arc::new(MeshArtifact {
      lod: 0,
      positions: vec![[0.0; 3]; 3],
      uvs: vec![[0.0; 2]; 3],
      indices: vec![0, 1, 2],
      normals: MeshNormals::RecalculateFlat,
    });

    let mut events = EventCounter::default();
    events.on_mesh_applied(IVec2::ZERO, 0, 0, &mesh);
    events.on_mesh_applied(IVec2::X, 0, 0, &mesh);
    assert_eq!(events.visible_triangles(), 2);

    events.on_visibility_changed(IVec2::X, false);
    assert_eq!(events.visible_triangles(), 1);
    assert_eq!(events.lod_switches, 2);
  }
}
