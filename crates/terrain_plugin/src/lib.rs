//! terrain_plugin - Framework/engine independent streaming heightfield terrain
//!
//! This crate generates an unbounded terrain surface around a moving viewer.
//! Chunks are produced as fractal noise heightfields, colored by height band,
//! converted to level-of-detail meshes with seam-free normals, and streamed in
//! and out as the viewer moves. All generation runs on a bounded worker pool;
//! results are delivered to the consuming thread once per tick.
//!
//! # Features
//!
//! - **Fractal noise**: seeded, offsettable octave sums with Local or Global
//!   normalization
//! - **Border-stitched normals**: a one-cell padding ring contributes to normal
//!   accumulation without ever being rendered, so chunk seams shade smoothly
//! - **Flat shading**: per-triangle vertex expansion for faceted terrain
//! - **Falloff mask**: square sigmoid decay for island-shaped worlds
//! - **Chunk streaming**: distance-driven visibility, lazy per-LOD meshes, and a
//!   deferred close-range collider mesh
//!
//! # Example
//!
//! ```ignore
//! use terrain_plugin::{ChunkStreamer, GenerationScheduler, MapGenerator, NullPresenter};
//!
//! let generator = MapGenerator::new(settings);
//! let scheduler = GenerationScheduler::new(generator, SchedulerConfig::default())?;
//! let mut streamer = ChunkStreamer::new(StreamerConfig::default(), scheduler)?;
//!
//! loop {
//!     streamer.update(viewer_position, &mut NullPresenter);
//! }
//! ```

pub mod bounds;
pub mod coloring;
pub mod constants;
pub mod curve;
pub mod falloff;
pub mod generator;
pub mod mesh;
pub mod metrics;
pub mod noise;
pub mod presentation;
pub mod scheduler;
pub mod streaming;
pub mod types;

// Re-export commonly used items
pub use bounds::Aabb2;
pub use coloring::{build_color_map, classify};
pub use constants::{map_chunk_size, simplification_increment, MAP_CHUNK_SIZE, MAP_CHUNK_SIZE_FLAT_SHADED};
pub use curve::{HeightCurve, Keyframe};
pub use falloff::{apply_falloff, generate_falloff_map};
pub use generator::{MapGenerator, TerrainConfig, TerrainSettings};
pub use mesh::{build_terrain_mesh, VertexSlot};
pub use noise::{generate_noise_map, NoiseConfig, NormalizeMode};
pub use presentation::{ChunkPresenter, NullPresenter};
pub use scheduler::{GenerationScheduler, MapCompletion, MeshCompletion, SchedulerConfig, SchedulerError};
pub use streaming::{
  select_lod_index, ChunkRecord, ChunkStreamer, DetailLevel, StreamerConfig, StreamerError,
  StreamerStats, ViewerState,
};
pub use types::{Color, ColorMap, Heightfield, MapArtifact, MeshArtifact, MeshNormals, Region};
