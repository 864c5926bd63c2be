//! Square falloff mask for island-shaped terrain.
//!
//! ```text
//!   value
//!     1 ┤                    ╭──
//!       │                   ╱
//!       │                  │
//!       │                ╱
//!     0 ┼──────────────╯──────── v = max(|x|, |y|)
//!       0                    1
//!
//!   f(v) = vᵏ / (vᵏ + (a − a·v)ᵏ),  k = 3, a = 2.2
//! ```
//!
//! The distance metric is Chebyshev, so iso-lines are squares aligned with the
//! chunk grid rather than circles.

use crate::types::Heightfield;

/// Steepness of the transition.
pub const FALLOFF_SLOPE: f32 = 3.0;
/// Shifts the transition toward the edge; larger keeps more land.
pub const FALLOFF_OFFSET: f32 = 2.2;
/// Mask value at the edges.
pub const FALLOFF_SCALE: f32 = 1.0;

/// Generate a `size × size` falloff mask in [0, 1]: ~0 at the center, ~1 at
/// the corners.
///
/// Cheap and deterministic, so callers regenerate it per request at the padded
/// heightfield size instead of caching it.
pub fn generate_falloff_map(size: usize) -> Heightfield {
  Heightfield::from_fn(size, size, |i, j| {
    let x = i as f32 / size as f32 * 2.0 - 1.0;
    let y = j as f32 / size as f32 * 2.0 - 1.0;
    evaluate(x.abs().max(y.abs()))
  })
}

/// Falloff curve for a Chebyshev distance `value` in [0, 1].
#[inline]
pub fn evaluate(value: f32) -> f32 {
  let a = value.powf(FALLOFF_SLOPE);
  let b = (FALLOFF_OFFSET - FALLOFF_OFFSET * value).powf(FALLOFF_SLOPE);
  FALLOFF_SCALE * a / (a + b)
}

/// Subtract `mask` from `heightfield` in place, clamping to [0, 1].
///
/// Both fields must share dimensions.
pub fn apply_falloff(heightfield: &mut Heightfield, mask: &Heightfield) {
  debug_assert_eq!(heightfield.width(), mask.width(), "falloff mask width mismatch");
  debug_assert_eq!(heightfield.height(), mask.height(), "falloff mask height mismatch");

  for (h, m) in heightfield.values_mut().iter_mut().zip(mask.values()) {
    *h = (*h - m).clamp(0.0, 1.0);
  }
}

#[cfg(test)]
#[path = "falloff_test.rs"]
mod falloff_test;
