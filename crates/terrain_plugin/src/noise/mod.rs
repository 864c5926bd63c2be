//! Fractal noise heightfields.
//!
//! Each cell is a sum of Perlin octaves at increasing frequency and decreasing
//! amplitude. Octave offsets come from a seeded ChaCha stream, so a given
//! `(config, origin)` pair always produces a bit-identical field; adjacent
//! chunks sample one continuous domain, which is what keeps their borders
//! seamless.

mod config;
mod fractal;

pub use config::{NoiseConfig, NormalizeMode, MIN_NOISE_SCALE};
pub use fractal::{generate_noise_map, max_possible_height, octave_offsets, OCTAVE_OFFSET_RANGE};

#[cfg(test)]
#[path = "fractal_test.rs"]
mod fractal_test;
