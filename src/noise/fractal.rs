//! Multi-octave fractal Brownian motion (fBm) noise generation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::perlin::PerlinNoise;

/// Configuration for multi-octave fractal noise generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractalNoiseConfig {
    /// Base frequency applied to the sample position (0.005-0.05 typical for pixel grids).
    pub frequency: f32,
    /// Number of noise octaves. Zero yields a flat zero field.
    pub octaves: u32,
    /// Amplitude of the first octave.
    pub amplitude: f32,
    /// Amplitude decay per octave (0.4-0.6 typical).
    pub persistence: f32,
    /// Frequency multiplier per octave (typically 2.0).
    pub lacunarity: f32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            frequency: 0.01,
            octaves: 6,
            amplitude: 1.0,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl FractalNoiseConfig {
    /// Default configuration at a different base frequency.
    pub fn with_frequency(frequency: f32) -> Self {
        Self {
            frequency,
            ..Default::default()
        }
    }

    /// Upper bound on how far octaves `octaves..` can move the sum, assuming
    /// each sample is bounded by `sample_bound`. Infinite when persistence >= 1.
    pub fn tail_bound(&self, sample_bound: f32) -> f32 {
        if self.persistence.abs() >= 1.0 {
            return f32::INFINITY;
        }
        sample_bound * self.amplitude.abs() * self.persistence.abs().powi(self.octaves as i32)
            / (1.0 - self.persistence.abs())
    }
}

/// Sums `config.octaves` octaves of gradient noise at `(x, y, z)`.
///
/// The result is not normalized; its range grows with amplitude and octave
/// count, and callers pick thresholds to match. Summation stops early once
/// the amplitude underflows to zero or the scaled position stops being finite.
pub fn sample_fractal_noise(
    noise: &PerlinNoise,
    x: f32,
    y: f32,
    z: f32,
    config: &FractalNoiseConfig,
) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = config.amplitude;
    let mut frequency = config.frequency;

    for _ in 0..config.octaves {
        let (sx, sy, sz) = (x * frequency, y * frequency, z * frequency);
        if amplitude == 0.0 || !(sx.is_finite() && sy.is_finite() && sz.is_finite()) {
            break;
        }
        total += noise.sample(sx, sy, sz) * amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    total
}

/// Samples fractal noise for a batch of positions.
///
/// # Returns
/// Vector of noise values, one per input position
pub fn sample_fractal_noise_batch(
    noise: &PerlinNoise,
    positions: &[Vec3],
    config: &FractalNoiseConfig,
) -> Vec<f32> {
    positions
        .iter()
        .map(|pos| sample_fractal_noise(noise, pos.x, pos.y, pos.z, config))
        .collect()
}

impl PerlinNoise {
    /// Fractal noise with the default parameters
    /// (frequency 0.01, 6 octaves, amplitude 1, persistence 0.5, lacunarity 2).
    pub fn noise(&self, x: f32, y: f32, z: f32) -> f32 {
        sample_fractal_noise(self, x, y, z, &FractalNoiseConfig::default())
    }

    /// Fractal noise with explicit parameters.
    pub fn fractal(&self, x: f32, y: f32, z: f32, config: &FractalNoiseConfig) -> f32 {
        sample_fractal_noise(self, x, y, z, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generous bound on a single sample's magnitude.
    const SAMPLE_BOUND: f32 = 1.1;

    #[test]
    fn test_default_config() {
        let config = FractalNoiseConfig::default();
        assert_eq!(config.octaves, 6);
        assert_eq!(config.frequency, 0.01);
        assert_eq!(config.amplitude, 1.0);
        assert_eq!(config.lacunarity, 2.0);
        assert_eq!(config.persistence, 0.5);
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let config = FractalNoiseConfig {
            octaves: 0,
            ..Default::default()
        };
        for seed in [0u32, 17, 4096] {
            let noise = PerlinNoise::with_seed(seed);
            for i in 0..50 {
                let t = i as f32 * 3.3;
                assert_eq!(sample_fractal_noise(&noise, t, -t, 1.0, &config), 0.0);
            }
        }
    }

    #[test]
    fn test_single_octave_matches_sampler() {
        let noise = PerlinNoise::with_seed(8);
        let config = FractalNoiseConfig {
            frequency: 0.25,
            octaves: 1,
            ..Default::default()
        };
        let direct = noise.sample(3.0 * 0.25, 7.0 * 0.25, 1.0 * 0.25);
        assert_eq!(noise.fractal(3.0, 7.0, 1.0, &config), direct);
    }

    #[test]
    fn test_known_values() {
        let noise = PerlinNoise::with_seed(0);
        assert!((noise.noise(3.0, 2.0, 1.0) - (-0.095_619_954)).abs() < 1e-6);
        assert!((noise.noise(100.0, 37.0, 1.0) - (-0.544_005_8)).abs() < 1e-6);
    }

    #[test]
    fn test_noise_reproducibility() {
        let noise = PerlinNoise::with_seed(12345);
        let config = FractalNoiseConfig::default();
        let result1 = sample_fractal_noise(&noise, 50.0, 30.0, 70.0, &config);
        let result2 = sample_fractal_noise(&noise, 50.0, 30.0, 70.0, &config);
        assert_eq!(result1, result2, "Same seed and position should produce same result");
    }

    #[test]
    fn test_octave_tail_is_bounded() {
        let noise = PerlinNoise::with_seed(21);
        for octaves in [1u32, 2, 3, 4, 6] {
            let base = FractalNoiseConfig {
                frequency: 0.037,
                octaves,
                ..Default::default()
            };
            let doubled = FractalNoiseConfig {
                octaves: octaves * 2,
                ..base
            };
            let bound = base.tail_bound(SAMPLE_BOUND);
            for i in 0..200 {
                let x = i as f32 * 1.7;
                let y = i as f32 * 0.9 + 11.0;
                let a = sample_fractal_noise(&noise, x, y, 1.0, &base);
                let b = sample_fractal_noise(&noise, x, y, 1.0, &doubled);
                assert!(
                    (a - b).abs() <= bound + 1e-5,
                    "octaves {} -> {} moved by {} (bound {})",
                    octaves,
                    octaves * 2,
                    (a - b).abs(),
                    bound
                );
            }
        }
    }

    #[test]
    fn test_very_deep_octaves_converge() {
        let noise = PerlinNoise::with_seed(0);
        let base = FractalNoiseConfig {
            octaves: 100,
            ..Default::default()
        };
        let doubled = FractalNoiseConfig {
            octaves: 200,
            ..base
        };
        for (x, y) in [(5.0, 7.0), (0.0, 0.0), (123.4, -56.7), (4096.0, 4096.0)] {
            let a = sample_fractal_noise(&noise, x, y, 1.0, &base);
            let b = sample_fractal_noise(&noise, x, y, 1.0, &doubled);
            assert!(b.is_finite(), "200 octaves at ({}, {}) gave {}", x, y, b);
            assert!((a - b).abs() <= base.tail_bound(SAMPLE_BOUND) + 1e-6);
        }
    }

    #[test]
    fn test_vanishing_amplitude_stops_summation() {
        let noise = PerlinNoise::with_seed(4);
        let config = FractalNoiseConfig {
            frequency: 0.3,
            octaves: 1000,
            persistence: 0.0,
            lacunarity: 10.0,
            ..Default::default()
        };
        let single = FractalNoiseConfig { octaves: 1, ..config };
        assert_eq!(
            sample_fractal_noise(&noise, 2.5, 1.5, 1.0, &config),
            sample_fractal_noise(&noise, 2.5, 1.5, 1.0, &single)
        );
    }

    #[test]
    fn test_tail_bound_diverges_without_decay() {
        let config = FractalNoiseConfig {
            persistence: 1.0,
            ..Default::default()
        };
        assert!(config.tail_bound(1.0).is_infinite());
    }

    #[test]
    fn test_batch_sampling() {
        let noise = PerlinNoise::with_seed(3);
        let config = FractalNoiseConfig::default();
        let positions = vec![
            Vec3::new(10.0, 0.0, 1.0),
            Vec3::new(0.0, 25.0, 1.0),
            Vec3::new(300.0, 12.0, 1.0),
        ];

        let batch_results = sample_fractal_noise_batch(&noise, &positions, &config);

        assert_eq!(batch_results.len(), positions.len());
        for (i, pos) in positions.iter().enumerate() {
            let single_result = sample_fractal_noise(&noise, pos.x, pos.y, pos.z, &config);
            assert_eq!(batch_results[i], single_result);
        }
    }

    #[test]
    fn test_empty_batch() {
        let noise = PerlinNoise::new();
        let results = sample_fractal_noise_batch(&noise, &[], &FractalNoiseConfig::default());
        assert!(results.is_empty());
    }
}
