//! Height-band coloring.
//!
//! Regions are scanned in authored order and the color keeps being overwritten
//! while `height >= region.height`; the scan stops at the first region that
//! fails. Lists must therefore be authored in ascending height order. This is
//! a caller precondition, not a checked invariant: a mis-ordered list silently
//! yields the wrong bands.

use crate::constants::BORDER_PADDING;
use crate::types::{Color, ColorMap, Heightfield, Region};

/// Color of the highest band `height` reaches, [`Color::CLEAR`] if none.
pub fn classify(height: f32, regions: &[Region]) -> Color {
  let mut color = Color::CLEAR;
  for region in regions {
    if height >= region.height {
      color = region.color;
    } else {
      break;
    }
  }
  color
}

/// Color the `size × size` interior of a padded heightfield.
///
/// Cell `(x, y)` of the map reads heightfield cell `(x + 1, y + 1)`, skipping
/// the padding ring.
pub fn build_color_map(heightfield: &Heightfield, regions: &[Region], size: usize) -> ColorMap {
  debug_assert!(heightfield.width() >= size + 2 * BORDER_PADDING);
  debug_assert!(heightfield.height() >= size + 2 * BORDER_PADDING);

  let mut colors = Vec::with_capacity(size * size);
  for y in 0..size {
    for x in 0..size {
      let height = heightfield.get(x + BORDER_PADDING, y + BORDER_PADDING);
      colors.push(classify(height, regions));
    }
  }

  ColorMap { size, colors }
}
