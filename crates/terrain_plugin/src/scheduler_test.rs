//! GenerationScheduler tests: delivery, ordering and bookkeeping.

use std::cell::Cell;
use std::time::Duration;

use glam::{IVec2, Vec2};

use super::*;
use crate::generator::{TerrainConfig, TerrainSettings};
use crate::noise::NoiseConfig;

fn scheduler(threads: usize) -> GenerationScheduler {
  let settings = TerrainSettings {
    noise: NoiseConfig::default().with_scale(15.0).with_seed(3),
    terrain: TerrainConfig::default().with_chunk_size(13),
    regions: Vec::new(),
  };
  GenerationScheduler::new(
    MapGenerator::new(settings),
    SchedulerConfig::default().with_worker_threads(threads),
  )
  .unwrap()
}

/// Poll until `count` completions have been delivered or 5 seconds pass.
fn drain_until(
  scheduler: &mut GenerationScheduler,
  count: usize,
) -> (Vec<MapCompletion>, Vec<MeshCompletion>) {
  let mut maps = Vec::new();
  let mut meshes = Vec::new();
  let start = Instant::now();
  while maps.len() + meshes.len() < count && start.elapsed() < Duration::from_secs(5) {
    scheduler.drain(|m| maps.push(m), |m| meshes.push(m));
    std::thread::sleep(Duration::from_millis(1));
  }
  (maps, meshes)
}

#[test]
fn test_worker_thread_count() {
  assert_eq!(scheduler(2).worker_threads(), 2);
}

#[test]
fn test_map_request_delivers_once() {
  let mut scheduler = scheduler(2);
  scheduler.request_map_data(IVec2::new(1, -2), Vec2::new(12.0, -24.0));
  assert_eq!(scheduler.in_flight(), 1);

  let (maps, meshes) = drain_until(&mut scheduler, 1);
  assert_eq!(maps.len(), 1);
  assert!(meshes.is_empty());
  assert_eq!(maps[0].coord, IVec2::new(1, -2));
  assert_eq!(maps[0].map.heightfield.width(), 15);
  assert_eq!(scheduler.in_flight(), 0);

  // Nothing further arrives.
  std::thread::sleep(Duration::from_millis(20));
  assert_eq!(scheduler.drain(|_| panic!("extra map"), |_| panic!("extra mesh")), 0);
}

#[test]
fn test_map_matches_synchronous_generation() {
  let mut scheduler = scheduler(1);
  let center = Vec2::new(-36.0, 12.0);
  scheduler.request_map_data(IVec2::ZERO, center);

  let (maps, _) = drain_until(&mut scheduler, 1);
  let expected = scheduler.generator().generate_map_data(center);
  assert_eq!(maps[0].map.heightfield, expected.heightfield);
}

#[test]
fn test_mesh_completion_echoes_tags() {
  let mut scheduler = scheduler(2);
  let map = Arc::new(scheduler.generator().generate_map_data(Vec2::ZERO));

  scheduler.request_mesh_data(IVec2::new(4, 4), Arc::clone(&map), 2, 3);
  let (_, meshes) = drain_until(&mut scheduler, 1);

  assert_eq!(meshes.len(), 1);
  assert_eq!(meshes[0].coord, IVec2::new(4, 4));
  assert_eq!(meshes[0].lod_index, 2);
  assert_eq!(meshes[0].lod, 3);
  assert_eq!(meshes[0].mesh.lod, 3);
}

/// With a single worker jobs finish in submission order, and each channel
/// preserves that order on delivery.
#[test]
fn test_fifo_per_queue() {
  let mut scheduler = scheduler(1);
  let coords: Vec<IVec2> = (0..6).map(|i| IVec2::new(i, 0)).collect();
  for &coord in &coords {
    scheduler.request_map_data(coord, coord.as_vec2() * 12.0);
  }

  let (maps, _) = drain_until(&mut scheduler, coords.len());
  let delivered: Vec<IVec2> = maps.iter().map(|m| m.coord).collect();
  assert_eq!(delivered, coords);
}

#[test]
fn test_maps_drain_before_meshes() {
  let mut scheduler = scheduler(1);
  let map = Arc::new(scheduler.generator().generate_map_data(Vec2::ZERO));

  scheduler.request_mesh_data(IVec2::ZERO, Arc::clone(&map), 0, 0);
  scheduler.request_map_data(IVec2::ONE, Vec2::splat(12.0));

  // Wait for both to be queued, then drain in one call.
  let start = Instant::now();
  while scheduler.map_rx.len() + scheduler.mesh_rx.len() < 2 && start.elapsed() < Duration::from_secs(5) {
    std::thread::sleep(Duration::from_millis(1));
  }

  let seq = Cell::new(0);
  let mut map_at = None;
  let mut mesh_at = None;
  let delivered = scheduler.drain(
    |_| {
      map_at = Some(seq.get());
      seq.set(seq.get() + 1);
    },
    |_| {
      mesh_at = Some(seq.get());
      seq.set(seq.get() + 1);
    },
  );
  assert_eq!(delivered, 2);
  assert_eq!(map_at, Some(0));
  assert_eq!(mesh_at, Some(1));
}

#[test]
fn test_metrics_count_deliveries() {
  let mut scheduler = scheduler(2);
  scheduler.request_map_data(IVec2::ZERO, Vec2::ZERO);
  scheduler.request_map_data(IVec2::X, Vec2::new(12.0, 0.0));
  drain_until(&mut scheduler, 2);

  assert_eq!(scheduler.metrics().maps_generated, 2);
  assert_eq!(scheduler.metrics().meshes_generated, 0);
  assert_eq!(scheduler.metrics().map_timings.len(), 2);
}
