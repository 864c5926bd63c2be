//! Keyframed height curve used to reshape normalized heights before they are
//! scaled into mesh units.
//!
//! Segments are cubic Hermite splines between consecutive keys. Evaluation
//! outside the key range clamps to the first/last key value.
//!
//! ```text
//!   value
//!     1 ┤                ●
//!       │              ╱
//!       │           ╱
//!       │ ●───────●          flat lowlands, steep highlands
//!     0 ┼─────────────────── time
//!       0                1
//! ```

use serde::{Deserialize, Serialize};

/// Samples used by [`HeightCurve::max_value`] to bound spline overshoot.
const MAX_VALUE_SAMPLES: usize = 256;

/// A single curve key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
  pub time: f32,
  pub value: f32,
  /// Slope arriving at this key.
  #[serde(default)]
  pub in_tangent: f32,
  /// Slope leaving this key.
  #[serde(default)]
  pub out_tangent: f32,
}

impl Keyframe {
  pub fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
    Self {
      time,
      value,
      in_tangent,
      out_tangent,
    }
  }
}

/// Immutable keyframed curve. `Send + Sync`, so worker threads share one
/// instance instead of copying it per job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct HeightCurve {
  keys: Vec<Keyframe>,
}

impl HeightCurve {
  /// Curve from explicit keys (sorted by time here).
  pub fn new(mut keys: Vec<Keyframe>) -> Self {
    keys.sort_by(|a, b| a.time.total_cmp(&b.time));
    Self { keys }
  }

  /// Identity over [0, 1].
  pub fn linear() -> Self {
    Self::new(vec![
      Keyframe::new(0.0, 0.0, 1.0, 1.0),
      Keyframe::new(1.0, 1.0, 1.0, 1.0),
    ])
  }

  /// Same value everywhere.
  pub fn constant(value: f32) -> Self {
    Self::new(vec![Keyframe::new(0.0, value, 0.0, 0.0)])
  }

  /// Curve through `(time, value)` points with Catmull-Rom style tangents.
  pub fn from_points(points: &[(f32, f32)]) -> Self {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = sorted.len();
    let keys = (0..n)
      .map(|i| {
        let prev = sorted[i.saturating_sub(1)];
        let next = sorted[(i + 1).min(n - 1)];
        let dt = next.0 - prev.0;
        let slope = if dt > f32::EPSILON {
          (next.1 - prev.1) / dt
        } else {
          0.0
        };
        Keyframe::new(sorted[i].0, sorted[i].1, slope, slope)
      })
      .collect();

    Self::new(keys)
  }

  pub fn keys(&self) -> &[Keyframe] {
    &self.keys
  }

  /// Evaluate at `t`. An empty curve evaluates to 0.
  pub fn evaluate(&self, t: f32) -> f32 {
    let (first, last) = match (self.keys.first(), self.keys.last()) {
      (Some(first), Some(last)) => (first, last),
      _ => return 0.0,
    };

    if t <= first.time {
      return first.value;
    }
    if t >= last.time {
      return last.value;
    }

    // First key strictly after t; t is inside (first.time, last.time).
    let upper = self.keys.partition_point(|k| k.time <= t);
    let k0 = &self.keys[upper - 1];
    let k1 = &self.keys[upper];
    hermite(k0, k1, t)
  }

  /// Largest value reached on [first key, last key], sampled.
  pub fn max_value(&self) -> f32 {
    let (first, last) = match (self.keys.first(), self.keys.last()) {
      (Some(first), Some(last)) => (first.time, last.time),
      _ => return 0.0,
    };

    let sampled = (0..=MAX_VALUE_SAMPLES)
      .map(|i| first + (last - first) * i as f32 / MAX_VALUE_SAMPLES as f32)
      .map(|t| self.evaluate(t));

    self
      .keys
      .iter()
      .map(|k| k.value)
      .chain(sampled)
      .fold(f32::NEG_INFINITY, f32::max)
  }
}

impl Default for HeightCurve {
  fn default() -> Self {
    Self::linear()
  }
}

impl From<Vec<Keyframe>> for HeightCurve {
  fn from(keys: Vec<Keyframe>) -> Self {
    Self::new(keys)
  }
}

impl From<HeightCurve> for Vec<Keyframe> {
  fn from(curve: HeightCurve) -> Self {
    curve.keys
  }
}

#[inline]
fn hermite(k0: &Keyframe, k1: &Keyframe, t: f32) -> f32 {
  let dt = k1.time - k0.time;
  let s = (t - k0.time) / dt;
  let s2 = s * s;
  let s3 = s2 * s;

  let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
  let h10 = s3 - 2.0 * s2 + s;
  let h01 = -2.0 * s3 + 3.0 * s2;
  let h11 = s3 - s2;

  h00 * k0.value + h10 * dt * k0.out_tangent + h01 * k1.value + h11 * dt * k1.in_tangent
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_linear_is_identity() {
    let curve = HeightCurve::linear();
    for i in 0..=10 {
      let t = i as f32 / 10.0;
      assert!((curve.evaluate(t) - t).abs() < 1e-6, "t={t}");
    }
  }

  #[test]
  fn test_clamps_outside_key_range() {
    let curve = HeightCurve::linear();
    assert_eq!(curve.evaluate(-3.0), 0.0);
    assert_eq!(curve.evaluate(7.0), 1.0);
  }

  #[test]
  fn test_hits_keys_exactly() {
    let curve = HeightCurve::from_points(&[(0.0, 0.0), (0.4, 0.1), (1.0, 1.0)]);
    assert_eq!(curve.evaluate(0.0), 0.0);
    assert!((curve.evaluate(0.4) - 0.1).abs() < 1e-6);
    assert_eq!(curve.evaluate(1.0), 1.0);
  }

  #[test]
  fn test_keys_are_sorted() {
    let curve = HeightCurve::new(vec![
      Keyframe::new(1.0, 1.0, 0.0, 0.0),
      Keyframe::new(0.0, 0.0, 0.0, 0.0),
    ]);
    assert_eq!(curve.keys()[0].time, 0.0);
    assert_eq!(curve.keys()[1].time, 1.0);
  }

  #[test]
  fn test_constant_and_empty() {
    assert_eq!(HeightCurve::constant(0.3).evaluate(0.9), 0.3);
    assert_eq!(HeightCurve::new(Vec::new()).evaluate(0.5), 0.0);
    assert_eq!(HeightCurve::new(Vec::new()).max_value(), 0.0);
  }

  #[test]
  fn test_max_value_of_linear() {
    assert!((HeightCurve::linear().max_value() - 1.0).abs() < 1e-6);
  }
}
