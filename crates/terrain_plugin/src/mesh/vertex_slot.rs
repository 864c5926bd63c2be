//! Interior/border vertex tagging.

/// Where a sampled heightfield vertex ends up.
///
/// Interior vertices are rendered. Border vertices come from the padding ring:
/// they only feed normal accumulation and never reach the output mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexSlot {
  /// Index into the rendered vertex buffer.
  Interior(u32),
  /// Index into the border-only vertex buffer.
  Border(u32),
}

impl VertexSlot {
  #[inline]
  pub fn is_border(self) -> bool {
    matches!(self, VertexSlot::Border(_))
  }

  /// Flat signed encoding: interior `i → i`, border `i → -(i + 1)`.
  ///
  /// Zero stays a valid interior index.
  #[inline]
  pub fn to_signed(self) -> i32 {
    match self {
      VertexSlot::Interior(i) => i as i32,
      VertexSlot::Border(i) => -(i as i32) - 1,
    }
  }

  /// Inverse of [`VertexSlot::to_signed`].
  #[inline]
  pub fn from_signed(value: i32) -> Self {
    if value < 0 {
      VertexSlot::Border((-(value + 1)) as u32)
    } else {
      VertexSlot::Interior(value as u32)
    }
  }
}

/// Heightfield cells sampled along one axis at the given stride.
///
/// Always contains the padding ring (`0`, `n - 1`) and both interior edges
/// (`1`, `n - 2`); the stride applies between them. The last interior step is
/// shortened when the stride does not divide the interior span.
pub(crate) fn sample_cells(bordered_size: usize, step: usize) -> Vec<usize> {
  if bordered_size <= 3 {
    return (0..bordered_size).collect();
  }
  let last_interior = bordered_size - 2;
  let mut cells = Vec::with_capacity(last_interior / step + 3);
  cells.push(0);
  cells.extend((1..last_interior).step_by(step.max(1)));
  cells.push(last_interior);
  cells.push(bordered_size - 1);
  cells
}

/// Slot assignment for every sampled vertex of a padded heightfield at one
/// sample stride.
///
/// Slots are assigned in row-major scan order, so interior index `i` is the
/// `i`-th interior sample visited. Stored in the flat signed encoding.
pub(crate) struct VertexSlotGrid {
  cells: Vec<usize>,
  slots: Vec<i32>,
  interior_count: u32,
  border_count: u32,
}

impl VertexSlotGrid {
  pub(crate) fn new(bordered_size: usize, step: usize) -> Self {
    let cells = sample_cells(bordered_size, step);
    let samples_per_line = cells.len();
    let mut slots = Vec::with_capacity(samples_per_line * samples_per_line);
    let mut interior_count = 0u32;
    let mut border_count = 0u32;

    for &y in &cells {
      for &x in &cells {
        let is_border = x == 0 || y == 0 || x == bordered_size - 1 || y == bordered_size - 1;

        let slot = if is_border {
          border_count += 1;
          VertexSlot::Border(border_count - 1)
        } else {
          interior_count += 1;
          VertexSlot::Interior(interior_count - 1)
        };
        slots.push(slot.to_signed());
      }
    }

    Self {
      cells,
      slots,
      interior_count,
      border_count,
    }
  }

  /// Slot of sample `(sx, sy)` (sample coordinates, not heightfield cells).
  #[inline]
  pub(crate) fn get(&self, sx: usize, sy: usize) -> VertexSlot {
    VertexSlot::from_signed(self.slots[sy * self.cells.len() + sx])
  }

  /// Heightfield cell of sample index `s` along either axis.
  #[inline]
  pub(crate) fn cell(&self, s: usize) -> usize {
    self.cells[s]
  }

  #[inline]
  pub(crate) fn samples_per_line(&self) -> usize {
    self.cells.len()
  }

  #[inline]
  pub(crate) fn interior_count(&self) -> usize {
    self.interior_count as usize
  }

  #[inline]
  pub(crate) fn border_count(&self) -> usize {
    self.border_count as usize
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_signed_encoding() {
    assert_eq!(VertexSlot::Interior(0).to_signed(), 0);
    assert_eq!(VertexSlot::Interior(17).to_signed(), 17);
    assert_eq!(VertexSlot::Border(0).to_signed(), -1);
    assert_eq!(VertexSlot::Border(4).to_signed(), -5);
  }

  #[test]
  fn test_signed_encoding_inverts() {
    for slot in [
      VertexSlot::Interior(0),
      VertexSlot::Interior(9),
      VertexSlot::Border(0),
      VertexSlot::Border(31),
    ] {
      assert_eq!(VertexSlot::from_signed(slot.to_signed()), slot);
    }
  }

  #[test]
  fn test_grid_counts_at_full_resolution() {
    let n = 7;
    let grid = VertexSlotGrid::new(n, 1);
    assert_eq!(grid.samples_per_line(), n);
    assert_eq!(grid.interior_count(), (n - 2) * (n - 2));
    assert_eq!(grid.border_count(), 4 * (n - 2) + 4);
  }

  #[test]
  fn test_grid_scan_order() {
    let grid = VertexSlotGrid::new(5, 1);
    assert_eq!(grid.get(0, 0), VertexSlot::Border(0));
    assert_eq!(grid.get(4, 0), VertexSlot::Border(4));
    assert_eq!(grid.get(0, 1), VertexSlot::Border(5));
    assert_eq!(grid.get(1, 1), VertexSlot::Interior(0));
    assert_eq!(grid.get(3, 3), VertexSlot::Interior(8));
  }

  #[test]
  fn test_grid_with_stride() {
    // 13 cells, stride 4: samples at 0, 1, 5, 9, 11, 12.
    let grid = VertexSlotGrid::new(13, 4);
    assert_eq!(grid.samples_per_line(), 6);
    assert_eq!(grid.interior_count(), 16);
    assert_eq!(grid.border_count(), 20);
    assert_eq!(grid.cell(4), 11);
  }

  #[test]
  fn test_sample_cells_reach_ring_for_every_stride() {
    for n in [15, 97, 241] {
      for step in [1, 2, 4, 6, 8, 10, 12] {
        let cells = sample_cells(n, step);
        assert_eq!(&cells[..2], &[0, 1], "n {n} step {step}");
        assert_eq!(&cells[cells.len() - 2..], &[n - 2, n - 1], "n {n} step {step}");
        assert!(cells.windows(2).all(|w| w[0] < w[1] && w[1] - w[0] <= step), "n {n} step {step}");
      }
    }
  }

  #[test]
  fn test_sample_cells_full_resolution() {
    assert_eq!(sample_cells(6, 1), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(sample_cells(3, 2), vec![0, 1, 2]);
  }
}
