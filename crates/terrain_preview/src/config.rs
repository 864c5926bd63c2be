//! Preview settings file.
//!
//! ```toml
//! [noise]
//! scale = 60.0
//! octaves = 5
//!
//! [terrain]
//! height_multiplier = 28.0
//! height_curve = [{ time = 0.0, value = 0.0 }, { time = 1.0, value = 1.0, in_tangent = 2.0 }]
//!
//! [[regions]]
//! name = "water"
//! height = 0.0
//! color = { r = 0.2, g = 0.4, b = 0.8, a = 1.0 }
//!
//! [streaming]
//! collider_lod_index = 0
//! detail_levels = [{ lod = 0, visible_dist_threshold = 200.0 }]
//! ```
//!
//! Every section is optional and falls back to the library defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use terrain_plugin::{NoiseConfig, Region, StreamerConfig, TerrainConfig, TerrainSettings};

/// Root configuration for the preview tool.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
  pub noise: NoiseConfig,
  pub terrain: TerrainConfig,
  /// Height bands, ascending by threshold.
  pub regions: Vec<Region>,
  pub streaming: StreamerConfig,
}

impl PreviewConfig {
  /// Load configuration from a TOML file.
  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: PreviewConfig = toml::from_str(&content).with_context(|| "Failed to parse config TOML")?;
    config.validate()?;
    Ok(config)
  }

  /// Reject settings the core assumes are well formed.
  pub fn validate(&self) -> Result<()> {
    if !(self.terrain.uniform_scale > 0.0) {
      anyhow::bail!("terrain.uniform_scale must be positive, got {}", self.terrain.uniform_scale);
    }
    if !self.terrain.height_multiplier.is_finite() {
      anyhow::bail!("terrain.height_multiplier must be finite");
    }
    if let Some(size) = self.terrain.chunk_size {
      if size < 4 {
        anyhow::bail!("terrain.chunk_size must be at least 4, got {size}");
      }
    }
    for pair in self.regions.windows(2) {
      if pair[1].height < pair[0].height {
        anyhow::bail!(
          "regions must be in ascending height order: '{}' ({}) follows '{}' ({})",
          pair[1].name,
          pair[1].height,
          pair[0].name,
          pair[0].height
        );
      }
    }
    self.streaming.validate().context("Invalid [streaming] section")?;
    Ok(())
  }

  pub fn terrain_settings(&self) -> TerrainSettings {
    TerrainSettings {
      noise: self.noise.clone(),
      terrain: self.terrain.clone(),
      regions: self.regions.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_file_uses_defaults() {
    let config: PreviewConfig = toml::from_str("").unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.terrain.uniform_scale, 2.5);
    assert_eq!(config.streaming.detail_levels.len(), 3);
  }

  #[test]
  fn test_parses_sections() {
    let config: PreviewConfig = toml::from_str(
      r#"
      [noise]
      scale = 42.0
      octaves = 6
      normalize_mode = "Local"

      [terrain]
      flat_shading = true
      height_curve = [{ time = 0.0, value = 0.0 }, { time = 1.0, value = 2.0 }]

      [[regions]]
      name = "water"
      height = 0.0
      color = { r = 0.0, g = 0.0, b = 1.0, a = 1.0 }

      [[regions]]
      name = "land"
      height = 0.4
      color = { r = 0.0, g = 1.0, b = 0.0, a = 1.0 }

      [streaming]
      collider_lod_index = 1
      detail_levels = [
        { lod = 0, visible_dist_threshold = 100.0 },
        { lod = 2, visible_dist_threshold = 300.0 },
      ]
      "#,
    )
    .unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.noise.octaves, 6);
    assert_eq!(config.noise.normalize_mode, terrain_plugin::NormalizeMode::Local);
    assert_eq!(config.terrain.map_chunk_size(), 95);
    assert_eq!(config.terrain.height_curve.evaluate(1.0), 2.0);
    assert_eq!(config.regions[1].name, "land");
    assert_eq!(config.streaming.max_view_distance(), 300.0);
  }

  #[test]
  fn test_rejects_descending_regions() {
    let config: PreviewConfig = toml::from_str(
      r#"
      [[regions]]
      height = 0.5
      color = { r = 1.0, g = 1.0, b = 1.0, a = 1.0 }

      [[regions]]
      height = 0.2
      color = { r = 0.0, g = 0.0, b = 0.0, a = 1.0 }
      "#,
    )
    .unwrap();
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_rejects_bad_streaming_section() {
    let config: PreviewConfig = toml::from_str(
      r#"
      [streaming]
      collider_lod_index = 5
      "#,
    )
    .unwrap();
    let err = config.validate().unwrap_err();
    assert!(format!("{err:#}").contains("collider LOD index 5"));
  }
}
