//! Seeded island terrain generator.
//!
//! This crate builds a reproducible layered island map from a seed: a
//! wyhash32 generator shuffles a Perlin permutation table, fractal noise is
//! sampled over a grid, a radial mask shapes the island, and each cell is
//! classified into an elevation layer.

pub mod export;
pub mod noise;
pub mod terrain;

pub use noise::{FractalNoiseConfig, PerlinNoise, PermutationTable, Wyhash32};
pub use terrain::{
    generate_terrain, LayerPalette, RadialMask, TerrainConfig, TerrainError, TerrainField,
    TerrainGenerator, TerrainParams,
};
