//! Terrain generation module.
//!
//! Turns seeded fractal noise and a radial mask into a grid of elevation
//! layer indices.

mod config;
mod error;
mod field;
mod generator;
mod layers;
mod mask;

pub use config::{ConfigError, TerrainConfig};
pub use error::TerrainError;
pub use field::{TerrainField, OUTSIDE_VALUE};
pub use generator::{
    generate_terrain, sample_cell, TerrainGenerator, TerrainParams, BASE_AMPLITUDE, LACUNARITY,
    PERSISTENCE, SLICE_Z,
};
pub use layers::{classify, validate_thresholds, Layer, LayerPalette};
pub use mask::{MaskConfig, RadialMask};
