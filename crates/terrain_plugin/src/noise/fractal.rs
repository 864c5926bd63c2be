//! Octave summation and normalization.

use glam::Vec2;
use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use super::config::{NoiseConfig, NormalizeMode, MIN_NOISE_SCALE};
use crate::types::Heightfield;

/// Octave offsets are drawn from `[-OCTAVE_OFFSET_RANGE, OCTAVE_OFFSET_RANGE)`.
pub const OCTAVE_OFFSET_RANGE: i32 = 100_000;

/// Lattice seed for the underlying gradient noise. Per-world variation comes
/// from the octave offsets, not from the lattice.
const LATTICE_SEED: u32 = 0;

/// Theoretical bound of an infinite octave sum with the given persistence.
///
/// `persistence == 1` yields infinity, which flattens Global output to 0.
#[inline]
pub fn max_possible_height(persistence: f32) -> f32 {
  1.0 / (1.0 - persistence)
}

/// Per-octave sample offsets for a chunk origin.
///
/// The origin's x is added and its y subtracted: the field's y axis maps to
/// the mesh's -Z, so this keeps neighboring chunks sampling a continuous,
/// unmirrored domain.
pub fn octave_offsets(config: &NoiseConfig, origin: Vec2) -> SmallVec<[Vec2; 8]> {
  let mut rng = ChaCha8Rng::seed_from_u64(config.seed as i64 as u64);
  (0..config.octaves)
    .map(|_| {
      let x = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE) as f32 + origin.x;
      let y = rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE) as f32 - origin.y;
      Vec2::new(x, y)
    })
    .collect()
}

/// Generate a normalized `width × height` fractal noise field.
///
/// `origin` is the chunk center in mesh units (the config offset is added
/// here). Output values:
/// - [`NormalizeMode::Local`]: exactly [0, 1]; a constant field maps to 0.
/// - [`NormalizeMode::Global`]: `(v + 1) / max_possible_height`, clamped to
///   `[0, ∞)`, or `[0, 1]` when `clamp_global_to_unit` is set.
#[tracing::instrument(level = "trace", skip(config), fields(seed = config.seed))]
pub fn generate_noise_map(width: usize, height: usize, config: &NoiseConfig, origin: Vec2) -> Heightfield {
  let scale = if config.scale > 0.0 {
    config.scale
  } else {
    MIN_NOISE_SCALE
  } as f64;

  let offsets = octave_offsets(config, origin + config.offset);
  let perlin = Perlin::new(LATTICE_SEED);

  let half_width = width as f64 * 0.5;
  let half_height = height as f64 * 0.5;
  let persistence = config.persistence as f64;
  let lacunarity = config.lacunarity as f64;

  let mut min_local = f32::INFINITY;
  let mut max_local = f32::NEG_INFINITY;

  let mut field = Heightfield::from_fn(width, height, |x, y| {
    let mut amplitude = 1.0f64;
    let mut frequency = 1.0f64;
    let mut noise_height = 0.0f64;

    for offset in &offsets {
      let sample_x = (x as f64 - half_width + offset.x as f64) / scale * frequency;
      let sample_y = (y as f64 - half_height + offset.y as f64) / scale * frequency;

      noise_height += signed_perlin(&perlin, sample_x, sample_y) * amplitude;

      amplitude *= persistence;
      frequency *= lacunarity;
    }

    let value = noise_height as f32;
    min_local = min_local.min(value);
    max_local = max_local.max(value);
    value
  });

  match config.normalize_mode {
    NormalizeMode::Local => {
      for v in field.values_mut() {
        *v = inverse_lerp(min_local, max_local, *v);
      }
    }
    NormalizeMode::Global => {
      let max_height = max_possible_height(config.persistence);
      let upper = if config.clamp_global_to_unit {
        1.0
      } else {
        f32::INFINITY
      };
      for v in field.values_mut() {
        *v = ((*v + 1.0) / max_height).clamp(0.0, upper);
      }
    }
  }

  field
}

/// Perlin sample remapped from [0, 1] to [-1, 1].
#[inline]
fn signed_perlin(perlin: &Perlin, x: f64, y: f64) -> f64 {
  let unit = ((perlin.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0);
  unit * 2.0 - 1.0
}

/// Position of `v` between `a` and `b` in [0, 1]; 0 when `a == b`.
#[inline]
fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
  if a == b {
    0.0
  } else {
    ((v - a) / (b - a)).clamp(0.0, 1.0)
  }
}
