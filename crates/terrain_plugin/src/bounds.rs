//! Axis-aligned square footprint of a chunk on the ground plane.

use glam::Vec2;

/// Axis-aligned box on the XZ plane, in viewer (unscaled mesh) units.
///
/// Streaming measures the distance from the viewer to a chunk's nearest edge
/// rather than to its center, so a viewer standing inside a chunk is at
/// distance zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
  /// Minimum corner (inclusive).
  pub min: Vec2,
  /// Maximum corner (inclusive).
  pub max: Vec2,
}

impl Aabb2 {
  /// Create a new box from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on both axes.
  pub fn new(min: Vec2, max: Vec2) -> Self {
    debug_assert!(min.x <= max.x && min.y <= max.y, "AABB min must be <= max on both axes");
    Self { min, max }
  }

  /// Square box of side `size` centered on `center`.
  pub fn from_center_size(center: Vec2, size: f32) -> Self {
    let half = Vec2::splat(size * 0.5);
    Self::new(center - half, center + half)
  }

  /// Squared distance from `point` to the closest point of the box (0 inside).
  #[inline]
  pub fn sqr_distance_to_point(&self, point: Vec2) -> f32 {
    let closest = point.clamp(self.min, self.max);
    point.distance_squared(closest)
  }

  #[inline]
  pub fn distance_to_point(&self, point: Vec2) -> f32 {
    self.sqr_distance_to_point(point).sqrt()
  }

  pub fn size(&self) -> Vec2 {
    self.max - self.min
  }

  pub fn center(&self) -> Vec2 {
    (self.min + self.max) * 0.5
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_center_size() {
    let aabb = Aabb2::from_center_size(Vec2::new(10.0, -4.0), 8.0);
    assert_eq!(aabb.min, Vec2::new(6.0, -8.0));
    assert_eq!(aabb.max, Vec2::new(14.0, 0.0));
    assert_eq!(aabb.size(), Vec2::splat(8.0));
    assert_eq!(aabb.center(), Vec2::new(10.0, -4.0));
  }

  #[test]
  fn test_distance_inside_is_zero() {
    let aabb = Aabb2::from_center_size(Vec2::ZERO, 10.0);
    assert_eq!(aabb.sqr_distance_to_point(Vec2::new(3.0, -2.0)), 0.0);
  }

  #[test]
  fn test_distance_to_edge_and_corner() {
    let aabb = Aabb2::from_center_size(Vec2::ZERO, 2.0);
    // Straight out from the +X edge.
    assert_eq!(aabb.distance_to_point(Vec2::new(4.0, 0.5)), 3.0);
    // Diagonal from the (1, 1) corner.
    assert_eq!(aabb.sqr_distance_to_point(Vec2::new(4.0, 5.0)), 25.0);
  }
}
