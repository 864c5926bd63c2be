//! Viewer position tracking for the streamer.

use glam::{Vec2, Vec3};

/// Where the viewer is on the ground plane, in mesh units, and where it was
/// when chunks were last swept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewerState {
  pub position: Vec2,
  /// `None` until the first sweep.
  pub last_sweep: Option<Vec2>,
}

impl ViewerState {
  /// Project a world-space position onto the XZ plane and undo the terrain's
  /// uniform scale.
  pub fn project(world: Vec3, uniform_scale: f32) -> Vec2 {
    Vec2::new(world.x, world.z) / uniform_scale
  }

  /// The viewer is somewhere other than where the last sweep happened.
  pub fn moved_since_sweep(&self) -> bool {
    self.last_sweep != Some(self.position)
  }

  /// First tick, or the viewer travelled farther than `threshold` since the
  /// last sweep.
  pub fn needs_sweep(&self, threshold: f32) -> bool {
    match self.last_sweep {
      None => true,
      Some(last) => last.distance_squared(self.position) > threshold * threshold,
    }
  }

  pub fn mark_swept(&mut self) {
    self.last_sweep = Some(self.position);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_project_drops_height_and_scale() {
    let p = ViewerState::project(Vec3::new(10.0, 500.0, -5.0), 2.5);
    assert_eq!(p, Vec2::new(4.0, -2.0));
  }

  #[test]
  fn test_sweep_threshold() {
    let mut viewer = ViewerState::default();
    assert!(viewer.needs_sweep(25.0));
    viewer.mark_swept();
    assert!(!viewer.moved_since_sweep());

    viewer.position = Vec2::new(20.0, 0.0);
    assert!(viewer.moved_since_sweep());
    assert!(!viewer.needs_sweep(25.0));

    viewer.position = Vec2::new(25.5, 0.0);
    assert!(viewer.needs_sweep(25.0));
  }
}
