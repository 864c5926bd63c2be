//! NoiseConfig - parameters for fractal noise generation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Smallest accepted noise scale; non-positive scales clamp to this.
pub const MIN_NOISE_SCALE: f32 = 0.000001;

/// How raw octave sums are mapped into [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizeMode {
  /// Rescale by the min/max observed in this field. Exact [0, 1] range, but
  /// adjacent chunks normalize differently and seams show.
  Local,
  /// Divide by the theoretical amplitude bound. Consistent across chunks, so
  /// required for streaming.
  #[default]
  Global,
}

/// Configuration for fractal noise generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
  /// Feature size in samples. Larger = broader features.
  pub scale: f32,
  /// Number of octaves summed.
  pub octaves: u32,
  /// Amplitude multiplier per octave, in [0, 1].
  pub persistence: f32,
  /// Frequency multiplier per octave, >= 1.
  pub lacunarity: f32,
  pub seed: i32,
  /// Offset added to every chunk's sample origin.
  pub offset: Vec2,
  pub normalize_mode: NormalizeMode,
  /// Also clamp Global-normalized values above 1.0. Off by default, in which
  /// case Global output is only clamped from below.
  pub clamp_global_to_unit: bool,
}

impl Default for NoiseConfig {
  fn default() -> Self {
    Self {
      scale: 50.0,
      octaves: 4,
      persistence: 0.5,
      lacunarity: 2.0,
      seed: 0,
      offset: Vec2::ZERO,
      normalize_mode: NormalizeMode::Global,
      clamp_global_to_unit: false,
    }
  }
}

impl NoiseConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_scale(mut self, scale: f32) -> Self {
    self.scale = scale;
    self
  }

  pub fn with_octaves(mut self, octaves: u32) -> Self {
    self.octaves = octaves;
    self
  }

  pub fn with_persistence(mut self, persistence: f32) -> Self {
    self.persistence = persistence;
    self
  }

  pub fn with_lacunarity(mut self, lacunarity: f32) -> Self {
    self.lacunarity = lacunarity;
    self
  }

  pub fn with_seed(mut self, seed: i32) -> Self {
    self.seed = seed;
    self
  }

  pub fn with_offset(mut self, offset: Vec2) -> Self {
    self.offset = offset;
    self
  }

  pub fn with_normalize_mode(mut self, mode: NormalizeMode) -> Self {
    self.normalize_mode = mode;
    self
  }

  pub fn with_clamp_global_to_unit(mut self, clamp: bool) -> Self {
    self.clamp_global_to_unit = clamp;
    self
  }

  /// Clamp out-of-range parameters to safe minimums.
  ///
  /// Invalid values are never an error: scale <= 0 becomes
  /// [`MIN_NOISE_SCALE`], lacunarity < 1 becomes 1, persistence is clamped to
  /// [0, 1].
  pub fn validated(mut self) -> Self {
    if !(self.scale > 0.0) {
      self.scale = MIN_NOISE_SCALE;
    }
    if !(self.lacunarity >= 1.0) {
      self.lacunarity = 1.0;
    }
    self.persistence = if self.persistence.is_nan() {
      0.0
    } else {
      self.persistence.clamp(0.0, 1.0)
    };
    self
  }
}
