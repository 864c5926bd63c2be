//! Headless terrain preview.
//!
//! Renders the pieces of a terrain configuration without an engine:
//! - noise-map: padded heightfield of chunk (0, 0) as greyscale PNG
//! - color-map: region-colored chunk (0, 0) as RGBA PNG
//! - falloff: island falloff mask as greyscale PNG
//! - mesh: chunk (0, 0) at `--lod` as Wavefront OBJ
//! - stream: scripted fly-through logging streaming statistics

mod config;
mod export;
mod flythrough;
mod logging;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use terrain_plugin::{
  constants::{padded_size, MAX_LOD},
  generate_falloff_map, ChunkStreamer, GenerationScheduler, MapGenerator, SchedulerConfig,
};
use tracing::info;

use config::PreviewConfig;

/// What to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
  NoiseMap,
  ColorMap,
  Mesh,
  Falloff,
  Stream,
}

impl Mode {
  fn default_output(self) -> &'static str {
    match self {
      Mode::NoiseMap => "noise_map.png",
      Mode::ColorMap => "color_map.png",
      Mode::Mesh => "chunk.obj",
      Mode::Falloff => "falloff.png",
      Mode::Stream => "",
    }
  }
}

/// Headless preview for streaming fractal terrain.
#[derive(Parser, Debug)]
#[command(name = "terrain_preview")]
#[command(about = "Renders terrain previews and runs streaming fly-throughs")]
struct Args {
  /// Path to settings TOML file (library defaults when omitted).
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Preview to produce.
  #[arg(short, long, value_enum, default_value_t = Mode::ColorMap)]
  mode: Mode,

  /// Mesh LOD for `mesh` mode.
  #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=MAX_LOD as i64))]
  lod: u32,

  /// Output file (default depends on mode).
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Ticks to simulate in `stream` mode.
  #[arg(long, default_value_t = 600)]
  ticks: u32,

  /// Viewer speed in scene units per tick for `stream` mode.
  #[arg(long, default_value_t = 4.0)]
  speed: f32,

  /// Milliseconds between ticks in `stream` mode.
  #[arg(long, default_value_t = 16)]
  tick_ms: u64,

  /// Worker threads (0 = one per core).
  #[arg(long, default_value_t = 0)]
  threads: usize,

  /// Debug logging for the terrain crates.
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<()> {
  let args = Args::parse();
  logging::init_logging(args.verbose);

  let config = match &args.config {
    Some(path) => {
      info!(path = %path.display(), "loading settings");
      PreviewConfig::load(path)?
    }
    None => PreviewConfig::default(),
  };

  let output = args
    .output
    .clone()
    .unwrap_or_else(|| PathBuf::from(args.mode.default_output()));
  let generator = MapGenerator::new(config.terrain_settings());

  match args.mode {
    Mode::NoiseMap => {
      let map = generator.generate_map_data(Vec2::ZERO);
      render::save_gray(&render::heightfield_image(&map.heightfield), &output)?;
      info!(output = %output.display(), size = map.heightfield.width(), "noise map written");
    }
    Mode::ColorMap => {
      let map = generator.generate_map_data(Vec2::ZERO);
      render::save_rgba(&render::color_map_image(&map.color_map), &output)?;
      info!(output = %output.display(), size = map.color_map.size, "color map written");
    }
    Mode::Falloff => {
      let mask = generate_falloff_map(padded_size(generator.map_chunk_size()));
      render::save_gray(&render::heightfield_image(&mask), &output)?;
      info!(output = %output.display(), size = mask.width(), "falloff mask written");
    }
    Mode::Mesh => {
      let map = generator.generate_map_data(Vec2::ZERO);
      let mesh = generator.generate_mesh_data(&map, args.lod);
      export::write_obj(&mesh, &output)?;
      info!(
        output = %output.display(),
        lod = args.lod,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        flat = mesh.is_flat_shaded(),
        "mesh written"
      );
    }
    Mode::Stream => {
      let scheduler = GenerationScheduler::new(generator, SchedulerConfig::default().with_worker_threads(args.threads))
        .context("Failed to start terrain workers")?;
      let mut streamer =
        ChunkStreamer::new(config.streaming.clone(), scheduler).context("Invalid streaming configuration")?;

      let events = flythrough::run(
        &mut streamer,
        args.ticks,
        args.speed,
        Duration::from_millis(args.tick_ms),
        60,
      );
      info!(
        maps = events.maps,
        shown = events.shown,
        hidden = events.hidden,
        lod_switches = events.lod_switches,
        colliders = events.colliders,
        evicted = events.evicted,
        "presenter events"
      );
    }
  }

  Ok(())
}
