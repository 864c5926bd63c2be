//! Generation metrics: timing history and delivery counters.
//!
//! Updated on the consuming thread as completions are drained, so no
//! synchronization is needed.
//!
//! # Usage
//!
//! ```ignore
//! let metrics = scheduler.metrics();
//! println!("avg map: {:.0}us", metrics.avg_map_timing_us());
//! ```

use std::collections::VecDeque;

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  /// Iterate over values (oldest to newest).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl RollingWindow<u64> {
  pub fn sum(&self) -> u64 {
    self.buffer.iter().sum()
  }

  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(128) // ~2 seconds of deliveries at 60 ticks/s
  }
}

/// Timing and count statistics for delivered artifacts.
#[derive(Debug, Clone, Default)]
pub struct GenerationMetrics {
  /// Worker time per map artifact (µs).
  pub map_timings: RollingWindow<u64>,
  /// Worker time per mesh artifact (µs).
  pub mesh_timings: RollingWindow<u64>,
  /// Map artifacts delivered since creation.
  pub maps_generated: u64,
  /// Mesh artifacts delivered since creation.
  pub meshes_generated: u64,
}

impl GenerationMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record_map_timing(&mut self, timing_us: u64) {
    self.map_timings.push(timing_us);
    self.maps_generated += 1;
  }

  pub fn record_mesh_timing(&mut self, timing_us: u64) {
    self.mesh_timings.push(timing_us);
    self.meshes_generated += 1;
  }

  pub fn avg_map_timing_us(&self) -> f64 {
    self.map_timings.average()
  }

  pub fn avg_mesh_timing_us(&self) -> f64 {
    self.mesh_timings.average()
  }
}
