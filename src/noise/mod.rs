//! Noise generation module for terrain synthesis.
//!
//! Everything here is deterministic: a seed fixes the permutation table, and
//! the table fixes every sample.

mod fractal;
mod perlin;
mod permutation;
mod random;

pub use fractal::{FractalNoiseConfig, sample_fractal_noise, sample_fractal_noise_batch};
pub use perlin::PerlinNoise;
pub use permutation::{PermutationTable, TABLE_SIZE};
pub use random::Wyhash32;
