//! Terrain field generation: masked fractal noise classified into layers.

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use super::error::TerrainError;
use super::field::{TerrainField, OUTSIDE_VALUE};
use super::layers::{classify, validate_thresholds, LayerPalette};
use super::mask::RadialMask;
use crate::noise::{sample_fractal_noise, FractalNoiseConfig, PerlinNoise};

/// Depth of the 2D slice taken through the 3D noise volume.
pub const SLICE_Z: f32 = 1.0;
/// Amplitude of the first octave.
pub const BASE_AMPLITUDE: f32 = 1.0;
/// Amplitude decay per octave.
pub const PERSISTENCE: f32 = 0.5;
/// Frequency growth per octave.
pub const LACUNARITY: f32 = 2.0;

/// Inputs to a single generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainParams {
    pub width: u32,
    pub height: u32,
    pub seed: u32,
    /// Base noise frequency; must be positive.
    pub frequency: f32,
    pub octaves: u32,
    /// Ascending band boundaries, at least two.
    pub thresholds: Vec<f32>,
    pub mask: RadialMask,
}

impl TerrainParams {
    /// Island defaults for a `width` x `height` grid: frequency 0.01, six
    /// octaves, the island palette's thresholds and a centered mask.
    pub fn new(width: u32, height: u32, seed: u32) -> Self {
        Self {
            width,
            height,
            seed,
            frequency: 0.01,
            octaves: 6,
            thresholds: LayerPalette::island().thresholds(),
            mask: RadialMask::island(width, height),
        }
    }

    /// Fractal settings the generator samples with.
    pub fn noise_config(&self) -> FractalNoiseConfig {
        FractalNoiseConfig {
            frequency: self.frequency,
            octaves: self.octaves,
            amplitude: BASE_AMPLITUDE,
            persistence: PERSISTENCE,
            lacunarity: LACUNARITY,
        }
    }

    /// Checks dimensions, frequency and thresholds.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.frequency > 0.0 && self.frequency.is_finite()) {
            return Err(TerrainError::InvalidFrequency(self.frequency));
        }
        validate_thresholds(&self.thresholds)
    }
}

/// A generation session. Owns the noise sampler (and so its permutation
/// table); independent sessions can run on separate threads.
#[derive(Debug, Clone, Default)]
pub struct TerrainGenerator {
    noise: PerlinNoise,
}

impl TerrainGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampler state left by the last run.
    pub fn noise(&self) -> &PerlinNoise {
        &self.noise
    }

    /// Generates a field for `params`.
    ///
    /// The sampler is reseeded with `params.seed` first, so the result depends
    /// only on `params`. Parameters are validated before any work is done.
    pub fn generate(&mut self, params: &TerrainParams) -> Result<TerrainField, TerrainError> {
        params.validate()?;

        let start = Instant::now();
        self.noise.reseed(params.seed);
        debug!("Permutation table reseeded with {}", params.seed);

        let mut field = TerrainField::new(
            params.width,
            params.height,
            params.seed,
            params.thresholds.len() - 1,
        );
        fill_field(&self.noise, params, &mut field);

        info!(
            "Generated {}x{} terrain (seed {}, {} octaves) in {} ms",
            params.width,
            params.height,
            params.seed,
            params.octaves,
            start.elapsed().as_millis()
        );
        Ok(field)
    }
}

/// One-shot generation with a fresh session.
pub fn generate_terrain(params: &TerrainParams) -> Result<TerrainField, TerrainError> {
    TerrainGenerator::new().generate(params)
}

/// Masked noise value at cell `(x, y)`, or [`OUTSIDE_VALUE`] if the mask cuts
/// the cell off.
pub fn sample_cell(
    noise: &PerlinNoise,
    x: u32,
    y: u32,
    mask: &RadialMask,
    config: &FractalNoiseConfig,
) -> f32 {
    let (fx, fy) = (x as f32, y as f32);
    match mask.falloff(fx, fy) {
        Some(gradient) => sample_fractal_noise(noise, fx, fy, SLICE_Z, config) - gradient,
        None => OUTSIDE_VALUE,
    }
}

/// Fills every cell. The table is read-only here, so rows run in parallel.
fn fill_field(noise: &PerlinNoise, params: &TerrainParams, field: &mut TerrainField) {
    let width = params.width as usize;
    let config = params.noise_config();
    let thresholds = params.thresholds.as_slice();

    field
        .bands
        .par_chunks_mut(width)
        .zip(field.values.par_chunks_mut(width))
        .enumerate()
        .for_each(|(y, (band_row, value_row))| {
            for (x, (band, value)) in band_row.iter_mut().zip(value_row.iter_mut()).enumerate() {
                let v = sample_cell(noise, x as u32, y as u32, &params.mask, &config);
                *value = v;
                *band = if v == OUTSIDE_VALUE {
                    0
                } else {
                    classify(thresholds, v) as u32
                };
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_params() -> TerrainParams {
        TerrainParams {
            width: 4,
            height: 4,
            seed: 0,
            frequency: 0.01,
            octaves: 1,
            thresholds: vec![-1.0, 0.0, 1.0],
            mask: RadialMask::disabled(4, 4),
        }
    }

    #[test]
    fn test_small_scenario_is_reproducible() {
        let params = scenario_params();
        let first = generate_terrain(&params).unwrap();
        let second = generate_terrain(&params).unwrap();

        assert_eq!(first.bands.len(), 16);
        assert!(first.bands.iter().all(|&b| b < 2));
        assert_eq!(first.bands, second.bands);
        assert_eq!(first.values, second.values);

        // Row 0 and column 0 lie on or past the radius of 2 around (2, 2).
        // Inside, column 1 sits above zero and columns 2-3 below.
        assert_eq!(first.band_row(0), &[0, 0, 0, 0]);
        for y in 1..4 {
            assert_eq!(first.band_row(y), &[0, 1, 0, 0]);
        }
        assert!(first.is_outside(0, 2));
        assert!(first.is_outside(2, 0));
        assert!(!first.is_outside(1, 1));
    }

    #[test]
    fn test_reseed_independence() {
        let mut generator = TerrainGenerator::new();
        let mut a = TerrainParams::new(48, 48, 11);
        a.frequency = 0.05;
        let b = TerrainParams { seed: 12, ..a.clone() };

        let first = generator.generate(&a).unwrap();
        let other = generator.generate(&b).unwrap();
        let again = generator.generate(&a).unwrap();

        assert_eq!(first, again);
        assert_ne!(first.values, other.values);
    }

    #[test]
    fn test_mask_forces_lowest_band() {
        for seed in [0u32, 5, 77] {
            let mut params = TerrainParams::new(40, 40, seed);
            params.frequency = 0.2;
            let field = generate_terrain(&params).unwrap();
            let mask = params.mask;
            for (x, y) in field.cell_coords() {
                let d = mask.center.distance(glam::Vec2::new(x as f32, y as f32));
                if d >= mask.radius {
                    assert_eq!(field.band_at(x, y), 0, "cell ({}, {}) escaped the mask", x, y);
                    assert!(field.is_outside(x, y));
                }
            }
        }
    }

    #[test]
    fn test_mask_forces_band_zero_even_with_low_boundaries() {
        let mut params = TerrainParams::new(16, 16, 3);
        params.thresholds = vec![f32::NEG_INFINITY, f32::NEG_INFINITY, 0.0];
        let field = generate_terrain(&params).unwrap();
        assert_eq!(field.band_at(0, 0), 0);
    }

    #[test]
    fn test_disabled_mask_still_forces_corners() {
        let mut params = TerrainParams::new(16, 16, 3);
        params.mask = RadialMask::disabled(16, 16);
        params.thresholds = vec![-10.0, -5.0, 10.0];
        let field = generate_terrain(&params).unwrap();

        // (0, 0) is 11.3 cells from the center, past the radius of 8.
        assert!(field.is_outside(0, 0));
        assert_eq!(field.band_at(0, 0), 0);
        assert_eq!(field.band_at(8, 8), 1);
    }

    #[test]
    fn test_disabled_mask_skips_falloff() {
        let mut params = TerrainParams::new(16, 16, 3);
        params.mask = RadialMask::disabled(16, 16);
        let field = generate_terrain(&params).unwrap();
        let noise = PerlinNoise::with_seed(3);
        let config = params.noise_config();
        for (x, y) in field.cell_coords().filter(|&(x, y)| !field.is_outside(x, y)) {
            let raw = sample_fractal_noise(&noise, x as f32, y as f32, SLICE_Z, &config);
            assert_eq!(field.value_at(x, y), raw);
        }
    }

    #[test]
    fn test_high_octave_counts_stay_finite() {
        let mut params = TerrainParams::new(4, 4, 0);
        params.mask = RadialMask::disabled(4, 4);
        params.octaves = 200;
        let field = generate_terrain(&params).unwrap();
        for (x, y) in field.cell_coords().filter(|&(x, y)| !field.is_outside(x, y)) {
            assert!(field.value_at(x, y).is_finite());
        }

        let capped = generate_terrain(&TerrainParams { octaves: 100, ..params.clone() }).unwrap();
        assert_eq!(field.bands, capped.bands);
    }

    #[test]
    fn test_indices_cover_band_range() {
        let mut params = TerrainParams::new(64, 32, 99);
        params.frequency = 0.08;
        let bands = params.thresholds.len() - 1;
        let field = generate_terrain(&params).unwrap();
        assert_eq!(field.band_count, bands);
        assert!(field.bands.iter().all(|&b| (b as usize) < bands));
        assert_eq!(field.band_histogram().iter().sum::<usize>(), field.cell_count());
    }

    #[test]
    fn test_zero_octaves_gives_flat_field() {
        let mut params = TerrainParams::new(8, 8, 1234);
        params.octaves = 0;
        params.mask = RadialMask::disabled(8, 8);
        let field = generate_terrain(&params).unwrap();
        for (x, y) in field.cell_coords().filter(|&(x, y)| !field.is_outside(x, y)) {
            assert_eq!(field.value_at(x, y), 0.0);
        }
    }

    #[test]
    fn test_cell_values_match_sampler() {
        let params = TerrainParams::new(32, 32, 0);
        let field = generate_terrain(&params).unwrap();
        let noise = PerlinNoise::with_seed(0);
        let config = params.noise_config();
        for (x, y) in field.cell_coords() {
            assert_eq!(field.value_at(x, y), sample_cell(&noise, x, y, &params.mask, &config));
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut params = scenario_params();
        params.width = 0;
        assert_eq!(
            generate_terrain(&params),
            Err(TerrainError::InvalidDimensions { width: 0, height: 4 })
        );
        params.width = 4;
        params.height = 0;
        assert!(matches!(
            generate_terrain(&params),
            Err(TerrainError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_invalid_frequency() {
        for frequency in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            let mut params = scenario_params();
            params.frequency = frequency;
            assert!(matches!(
                generate_terrain(&params),
                Err(TerrainError::InvalidFrequency(_))
            ));
        }
    }

    #[test]
    fn test_invalid_thresholds() {
        let mut params = scenario_params();
        params.thresholds = vec![0.0];
        assert!(matches!(
            generate_terrain(&params),
            Err(TerrainError::InvalidThresholds(_))
        ));
        params.thresholds = vec![1.0, 0.0];
        assert!(matches!(
            generate_terrain(&params),
            Err(TerrainError::InvalidThresholds(_))
        ));
    }

    #[test]
    fn test_failed_generation_keeps_previous_table() {
        let mut generator = TerrainGenerator::new();
        generator.generate(&TerrainParams::new(8, 8, 5)).unwrap();
        let table = generator.noise().table().clone();

        let mut bad = TerrainParams::new(8, 8, 6);
        bad.frequency = 0.0;
        assert!(generator.generate(&bad).is_err());
        assert_eq!(generator.noise().table(), &table);
    }
}
