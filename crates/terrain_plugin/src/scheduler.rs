//! GenerationScheduler - background chunk generation with per-tick delivery.
//!
//! # Flow
//!
//! ```text
//! Consumer Thread                      Worker pool (rayon)
//! ┌──────────────────────┐
//! │ request_map_data()   │──spawn──► generate_map_data()  ──┐
//! │ request_mesh_data()  │──spawn──► generate_mesh_data() ──┤
//! └──────────────────────┘                                  │
//!                                         map channel  ◄────┤
//!                                         mesh channel ◄────┘
//! ┌──────────────────────┐                     │
//! │ drain(on_map,        │◄────────────────────┘
//! │       on_mesh)       │  maps first, then meshes, FIFO per channel
//! └──────────────────────┘
//! ```
//!
//! Requests never block. Every job delivers exactly one completion; there is
//! no deduplication, cancellation or timeout. Callers track what they asked
//! for and ignore completions they no longer care about.

use std::sync::Arc;

use crossbeam_channel::{self as channel, Receiver, Sender};
use glam::{IVec2, Vec2};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;
use web_time::Instant;

use crate::generator::MapGenerator;
use crate::metrics::GenerationMetrics;
use crate::types::{MapArtifact, MeshArtifact};

/// Worker pool configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerConfig {
  /// Worker thread count; 0 lets rayon pick (one per logical core).
  pub worker_threads: usize,
}

impl SchedulerConfig {
  pub fn with_worker_threads(mut self, threads: usize) -> Self {
    self.worker_threads = threads;
    self
  }
}

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
  #[error("failed to build terrain worker pool: {0}")]
  PoolBuild(#[from] rayon::ThreadPoolBuildError),
}

/// A finished map request.
#[derive(Debug)]
pub struct MapCompletion {
  pub coord: IVec2,
  pub map: Arc<MapArtifact>,
  /// Worker time spent generating, in microseconds.
  pub elapsed_us: u64,
}

/// A finished mesh request.
#[derive(Debug)]
pub struct MeshCompletion {
  pub coord: IVec2,
  /// Index into the caller's detail level list.
  pub lod_index: usize,
  pub lod: u32,
  pub mesh: Arc<MeshArtifact>,
  pub elapsed_us: u64,
}

/// Runs map and mesh generation on a bounded worker pool.
pub struct GenerationScheduler {
  generator: Arc<MapGenerator>,
  pool: ThreadPool,
  map_tx: Sender<MapCompletion>,
  map_rx: Receiver<MapCompletion>,
  mesh_tx: Sender<MeshCompletion>,
  mesh_rx: Receiver<MeshCompletion>,
  /// Requests issued but not yet drained.
  in_flight: usize,
  metrics: GenerationMetrics,
}

impl GenerationScheduler {
  pub fn new(generator: MapGenerator, config: SchedulerConfig) -> Result<Self, SchedulerError> {
    let pool = ThreadPoolBuilder::new()
      .num_threads(config.worker_threads)
      .thread_name(|i| format!("terrain-worker-{i}"))
      .build()?;

    let (map_tx, map_rx) = channel::unbounded();
    let (mesh_tx, mesh_rx) = channel::unbounded();

    debug!(threads = pool.current_num_threads(), "terrain scheduler started");

    Ok(Self {
      generator: Arc::new(generator),
      pool,
      map_tx,
      map_rx,
      mesh_tx,
      mesh_rx,
      in_flight: 0,
      metrics: GenerationMetrics::new(),
    })
  }

  pub fn generator(&self) -> &MapGenerator {
    &self.generator
  }

  /// Queue map generation for the chunk centered at `center` (mesh units).
  pub fn request_map_data(&mut self, coord: IVec2, center: Vec2) {
    debug!(?coord, "map requested");
    self.in_flight += 1;

    let generator = Arc::clone(&self.generator);
    let tx = self.map_tx.clone();
    self.pool.spawn(move || {
      let start = Instant::now();
      let map = generator.generate_map_data(center);
      let elapsed_us = start.elapsed().as_micros() as u64;
      // Receiver dropped = scheduler gone
      let _ = tx.send(MapCompletion {
        coord,
        map: Arc::new(map),
        elapsed_us,
      });
    });
  }

  /// Queue mesh generation of `map` at `lod`. `lod_index` is echoed back in
  /// the completion.
  pub fn request_mesh_data(&mut self, coord: IVec2, map: Arc<MapArtifact>, lod_index: usize, lod: u32) {
    debug!(?coord, lod_index, lod, "mesh requested");
    self.in_flight += 1;

    let generator = Arc::clone(&self.generator);
    let tx = self.mesh_tx.clone();
    self.pool.spawn(move || {
      let start = Instant::now();
      let mesh = generator.generate_mesh_data(&map, lod);
      let elapsed_us = start.elapsed().as_micros() as u64;
      let _ = tx.send(MeshCompletion {
        coord,
        lod_index,
        lod,
        mesh: Arc::new(mesh),
        elapsed_us,
      });
    });
  }

  /// Deliver completed work on the calling thread.
  ///
  /// Drains every map completion queued at call time, then every mesh
  /// completion. Completions arriving mid-drain wait for the next call.
  /// Returns the number delivered.
  pub fn drain(&mut self, mut on_map: impl FnMut(MapCompletion), mut on_mesh: impl FnMut(MeshCompletion)) -> usize {
    let maps = self.map_rx.len();
    let meshes = self.mesh_rx.len();

    for completion in self.map_rx.try_iter().take(maps) {
      self.metrics.record_map_timing(completion.elapsed_us);
      on_map(completion);
    }
    for completion in self.mesh_rx.try_iter().take(meshes) {
      self.metrics.record_mesh_timing(completion.elapsed_us);
      on_mesh(completion);
    }

    let delivered = maps + meshes;
    self.in_flight -= delivered;
    if delivered > 0 {
      debug!(maps, meshes, in_flight = self.in_flight, "completions drained");
    }
    delivered
  }

  /// Requests issued whose completions have not been drained yet.
  pub fn in_flight(&self) -> usize {
    self.in_flight
  }

  pub fn worker_threads(&self) -> usize {
    self.pool.current_num_threads()
  }

  pub fn metrics(&self) -> &GenerationMetrics {
    &self.metrics
  }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;
