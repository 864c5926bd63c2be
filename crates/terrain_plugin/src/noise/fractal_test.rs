use glam::Vec2;

use super::*;

fn config() -> NoiseConfig {
  NoiseConfig::default()
    .with_scale(25.0)
    .with_octaves(4)
    .with_seed(1337)
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_identical_inputs_are_bit_identical() {
  let cfg = config();
  let a = generate_noise_map(33, 33, &cfg, Vec2::new(238.0, -476.0));
  let b = generate_noise_map(33, 33, &cfg, Vec2::new(238.0, -476.0));

  let bits_a: Vec<u32> = a.values().iter().map(|v| v.to_bits()).collect();
  let bits_b: Vec<u32> = b.values().iter().map(|v| v.to_bits()).collect();
  assert_eq!(bits_a, bits_b);
}

#[test]
fn test_seed_changes_field() {
  let a = generate_noise_map(17, 17, &config(), Vec2::ZERO);
  let b = generate_noise_map(17, 17, &config().with_seed(7), Vec2::ZERO);
  assert_ne!(a, b);
}

#[test]
fn test_octave_offsets_apply_origin_asymmetrically() {
  let cfg = config();
  let base = octave_offsets(&cfg, Vec2::ZERO);
  let moved = octave_offsets(&cfg, Vec2::new(10.0, 10.0));

  assert_eq!(base.len(), 4);
  for (b, m) in base.iter().zip(moved.iter()) {
    assert_eq!(m.x, b.x + 10.0, "x adds the origin");
    assert_eq!(m.y, b.y - 10.0, "y subtracts the origin");
    assert!(b.x.abs() <= OCTAVE_OFFSET_RANGE as f32);
  }
}

/// Two fields whose origins differ by exactly one sample width must agree on
/// their overlapping columns: this is what keeps chunk borders seamless.
#[test]
fn test_adjacent_origins_share_overlap() {
  let cfg = config().with_normalize_mode(NormalizeMode::Global);
  let left = generate_noise_map(16, 8, &cfg, Vec2::ZERO);
  let right = generate_noise_map(16, 8, &cfg, Vec2::new(4.0, 0.0));

  for y in 0..8 {
    for x in 0..12 {
      let l = left.get(x + 4, y);
      let r = right.get(x, y);
      assert!((l - r).abs() < 1e-5, "mismatch at ({x},{y}): {l} vs {r}");
    }
  }
}

// =============================================================================
// Normalization
// =============================================================================

#[test]
fn test_local_normalization_spans_unit_range() {
  let cfg = config().with_normalize_mode(NormalizeMode::Local);
  let field = generate_noise_map(48, 48, &cfg, Vec2::new(12.0, 5.0));
  let (min, max) = field.min_max().unwrap();

  assert_eq!(min, 0.0);
  assert_eq!(max, 1.0);
}

/// Zero octaves produce a constant field; Local normalization maps the
/// degenerate min == max case to 0 everywhere.
#[test]
fn test_local_normalization_constant_field_is_zero() {
  let cfg = config()
    .with_octaves(0)
    .with_normalize_mode(NormalizeMode::Local);
  let field = generate_noise_map(8, 8, &cfg, Vec2::ZERO);

  assert!(field.values().iter().all(|&v| v == 0.0));
}

#[test]
fn test_global_normalization_of_constant_field() {
  let cfg = config()
    .with_octaves(0)
    .with_persistence(0.5)
    .with_normalize_mode(NormalizeMode::Global);
  let field = generate_noise_map(4, 4, &cfg, Vec2::ZERO);

  // (0 + 1) / (1 / (1 - 0.5)) = 0.5
  assert!(field.values().iter().all(|&v| (v - 0.5).abs() < 1e-6));
}

#[test]
fn test_global_normalization_never_negative() {
  let cfg = config()
    .with_octaves(6)
    .with_persistence(0.9)
    .with_normalize_mode(NormalizeMode::Global);
  let field = generate_noise_map(40, 40, &cfg, Vec2::new(-900.0, 300.0));

  assert!(field.values().iter().all(|&v| v >= 0.0));
}

/// With low persistence the amplitude sum is close to 1, so `(v + 1) / bound`
/// routinely exceeds 1 and Global output is left unclamped above.
#[test]
fn test_global_normalization_is_unbounded_above() {
  let cfg = config()
    .with_octaves(1)
    .with_persistence(0.1)
    .with_normalize_mode(NormalizeMode::Global);
  let field = generate_noise_map(64, 64, &cfg, Vec2::ZERO);
  let (_, max) = field.min_max().unwrap();

  assert!(max > 1.0, "expected values above 1, max was {max}");
}

#[test]
fn test_global_clamp_compat_flag() {
  let cfg = config()
    .with_octaves(1)
    .with_persistence(0.1)
    .with_normalize_mode(NormalizeMode::Global)
    .with_clamp_global_to_unit(true);
  let field = generate_noise_map(64, 64, &cfg, Vec2::ZERO);
  let (min, max) = field.min_max().unwrap();

  assert!(min >= 0.0);
  assert!(max <= 1.0);
}

#[test]
fn test_max_possible_height() {
  assert_eq!(max_possible_height(0.5), 2.0);
  assert_eq!(max_possible_height(0.0), 1.0);
  assert!(max_possible_height(1.0).is_infinite());
}

// =============================================================================
// Config clamping
// =============================================================================

#[test]
fn test_validated_clamps_to_safe_minimums() {
  let cfg = NoiseConfig::default()
    .with_scale(-4.0)
    .with_lacunarity(0.2)
    .with_persistence(1.7)
    .validated();

  assert_eq!(cfg.scale, MIN_NOISE_SCALE);
  assert_eq!(cfg.lacunarity, 1.0);
  assert_eq!(cfg.persistence, 1.0);
}

#[test]
fn test_non_positive_scale_still_generates() {
  let cfg = config().with_scale(0.0);
  let field = generate_noise_map(8, 8, &cfg, Vec2::ZERO);
  assert!(field.values().iter().all(|v| v.is_finite()));
}
