//! Terrain generation benchmarks.
//!
//! - **noise**: padded fractal noise fields at both chunk sizes, per octave count
//! - **mesh**: heightfield meshing per LOD, smooth and flat shaded
//! - **map**: full map artifact (noise + falloff + color map)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec2;
use terrain_plugin::{
  build_terrain_mesh, generate_noise_map, Color, HeightCurve, MapGenerator, NoiseConfig, Region,
  TerrainConfig, TerrainSettings, MAP_CHUNK_SIZE, MAP_CHUNK_SIZE_FLAT_SHADED,
};

const PADDED: usize = MAP_CHUNK_SIZE + 2;

// =============================================================================
// Noise
// =============================================================================

fn bench_noise_octaves(c: &mut Criterion) {
  let mut group = c.benchmark_group("noise_241_octaves");
  group.throughput(Throughput::Elements((PADDED * PADDED) as u64));
  group.sample_size(20);

  for octaves in [1u32, 4, 8] {
    let config = NoiseConfig::default().with_octaves(octaves).with_seed(7);
    group.bench_with_input(BenchmarkId::from_parameter(octaves), &config, |b, config| {
      b.iter(|| generate_noise_map(PADDED, PADDED, black_box(config), Vec2::ZERO));
    });
  }

  group.finish();
}

fn bench_noise_chunk_sizes(c: &mut Criterion) {
  let mut group = c.benchmark_group("noise_chunk_sizes");
  let config = NoiseConfig::default();

  for size in [MAP_CHUNK_SIZE_FLAT_SHADED, MAP_CHUNK_SIZE] {
    let padded = size + 2;
    group.throughput(Throughput::Elements((padded * padded) as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &padded, |b, &padded| {
      b.iter(|| generate_noise_map(padded, padded, black_box(&config), Vec2::new(238.0, 0.0)));
    });
  }

  group.finish();
}

// =============================================================================
// Meshing
// =============================================================================

fn bench_mesh_lods(c: &mut Criterion) {
  let mut group = c.benchmark_group("mesh_241_lods");
  let field = generate_noise_map(PADDED, PADDED, &NoiseConfig::default(), Vec2::ZERO);
  let curve = HeightCurve::from_points(&[(0.0, 0.0), (0.4, 0.05), (1.0, 1.0)]);

  for lod in [0u32, 1, 2, 4, 6] {
    group.bench_with_input(BenchmarkId::new("smooth", lod), &lod, |b, &lod| {
      b.iter(|| build_terrain_mesh(black_box(&field), 30.0, &curve, lod, false));
    });
  }

  group.finish();
}

fn bench_mesh_flat(c: &mut Criterion) {
  let mut group = c.benchmark_group("mesh_97_flat");
  let padded = MAP_CHUNK_SIZE_FLAT_SHADED + 2;
  let field = generate_noise_map(padded, padded, &NoiseConfig::default(), Vec2::ZERO);
  let curve = HeightCurve::linear();

  group.bench_function("smooth", |b| {
    b.iter(|| build_terrain_mesh(black_box(&field), 30.0, &curve, 0, false));
  });
  group.bench_function("flat", |b| {
    b.iter(|| build_terrain_mesh(black_box(&field), 30.0, &curve, 0, true));
  });

  group.finish();
}

// =============================================================================
// Full map artifact
// =============================================================================

fn bench_map_artifact(c: &mut Criterion) {
  let mut group = c.benchmark_group("map_artifact");
  group.sample_size(20);

  let regions = vec![
    Region::new("water", 0.0, Color::rgb(0.1, 0.3, 0.8)),
    Region::new("sand", 0.35, Color::rgb(0.8, 0.8, 0.5)),
    Region::new("grass", 0.45, Color::rgb(0.2, 0.6, 0.2)),
    Region::new("rock", 0.7, Color::rgb(0.4, 0.35, 0.3)),
    Region::new("snow", 0.9, Color::WHITE),
  ];

  for falloff in [false, true] {
    let generator = MapGenerator::new(TerrainSettings {
      noise: NoiseConfig::default(),
      terrain: TerrainConfig::default().with_falloff(falloff),
      regions: regions.clone(),
    });
    let name = if falloff { "falloff" } else { "plain" };
    group.bench_function(name, |b| {
      b.iter(|| generator.generate_map_data(black_box(Vec2::new(476.0, -238.0))));
    });
  }

  group.finish();
}

criterion_group!(
  benches,
  bench_noise_octaves,
  bench_noise_chunk_sizes,
  bench_mesh_lods,
  bench_mesh_flat,
  bench_map_artifact
);
criterion_main!(benches);
