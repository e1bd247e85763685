//! Terrain configuration and JSON presets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::generator::TerrainParams;
use super::layers::LayerPalette;
use super::mask::MaskConfig;

/// Errors that can occur while loading or saving a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything needed to reproduce one island.
///
/// Missing JSON fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    pub seed: u32,
    /// Base noise frequency (0.001 steps are meaningful).
    pub frequency: f32,
    pub octaves: u32,
    pub mask: MaskConfig,
    /// Layers from lowest to highest.
    pub layers: LayerPalette,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            seed: 0,
            frequency: 0.01,
            octaves: 6,
            mask: MaskConfig::default(),
            layers: LayerPalette::island(),
        }
    }
}

impl TerrainConfig {
    /// Default island with the given seed.
    pub fn island(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Kernel parameters for this configuration.
    pub fn to_params(&self) -> TerrainParams {
        TerrainParams {
            width: self.width,
            height: self.height,
            seed: self.seed,
            frequency: self.frequency,
            octaves: self.octaves,
            thresholds: self.layers.thresholds(),
            mask: self.mask.resolve(self.width, self.height),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::RadialMask;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TerrainConfig::default();
        assert_eq!((config.width, config.height), (512, 512));
        assert_eq!(config.seed, 0);
        assert_eq!(config.frequency, 0.01);
        assert_eq!(config.octaves, 6);
        assert!(config.mask.enabled);
        assert_eq!(config.layers.len(), 7);
    }

    #[test]
    fn test_to_params() {
        let config = TerrainConfig::island(42);
        let params = config.to_params();
        assert_eq!(params.seed, 42);
        assert_eq!(params.thresholds.len(), 8);
        assert_eq!(params.mask, RadialMask::island(512, 512));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = TerrainConfig::from_json_str(r#"{ "seed": 9, "octaves": 3 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.octaves, 3);
        assert_eq!(config.width, 512);
        assert_eq!(config.layers, LayerPalette::island());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let mut config = TerrainConfig::island(7);
        config.mask = MaskConfig::off();
        config.frequency = 0.02;

        let dir = tempdir().unwrap();
        let path = dir.path().join("presets").join("island.json");
        config.to_json_file(&path).unwrap();

        let loaded = TerrainConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            TerrainConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            TerrainConfig::from_json_file(Path::new("/nonexistent/worldtweak.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
