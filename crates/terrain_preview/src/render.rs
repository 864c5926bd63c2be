//! PNG previews of heightfields, falloff masks and color maps.

use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use terrain_plugin::{ColorMap, Heightfield};

/// Greyscale image of a heightfield, one pixel per cell. Values are clamped
/// to [0, 1] (Global normalization can exceed 1).
pub fn heightfield_image(field: &Heightfield) -> GrayImage {
  GrayImage::from_fn(field.width() as u32, field.height() as u32, |x, y| {
    let v = field.get(x as usize, y as usize).clamp(0.0, 1.0);
    Luma([(v * 255.0).round() as u8])
  })
}

pub fn color_map_image(map: &ColorMap) -> RgbaImage {
  let size = map.size as u32;
  RgbaImage::from_fn(size, size, |x, y| Rgba(map.get(x as usize, y as usize).to_rgba8()))
}

pub fn save_gray(image: &GrayImage, path: &Path) -> Result<()> {
  image
    .save(path)
    .with_context(|| format!("Failed to write: {}", path.display()))
}

pub fn save_rgba(image: &RgbaImage, path: &Path) -> Result<()> {
  image
    .save(path)
    .with_context(|| format!("Failed to write: {}", path.display()))
}
