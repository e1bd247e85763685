//! Elevation layers: threshold validation, classification and the display palette.

use serde::{Deserialize, Serialize};

use super::error::TerrainError;

/// Checks that `thresholds` has at least two entries, none NaN, in
/// non-decreasing order. The list is never sorted or repaired.
pub fn validate_thresholds(thresholds: &[f32]) -> Result<(), TerrainError> {
    if thresholds.len() < 2 {
        return Err(TerrainError::InvalidThresholds(format!(
            "need at least 2 boundaries, got {}",
            thresholds.len()
        )));
    }
    if let Some(i) = thresholds.iter().position(|t| t.is_nan()) {
        return Err(TerrainError::InvalidThresholds(format!("boundary {} is NaN", i)));
    }
    if let Some(i) = thresholds.windows(2).position(|w| w[1] < w[0]) {
        return Err(TerrainError::InvalidThresholds(format!(
            "boundary {} ({}) is below boundary {} ({})",
            i + 1,
            thresholds[i + 1],
            i,
            thresholds[i]
        )));
    }
    Ok(())
}

/// Band index of `value` against validated `thresholds`.
///
/// Returns the smallest `i` with `value < thresholds[i + 1]`, so a value equal
/// to a boundary lands in the band above it and values below `thresholds[0]`
/// clamp to band 0. Values at or above every boundary take the top band,
/// `thresholds.len() - 2`.
#[inline]
pub fn classify(thresholds: &[f32], value: f32) -> usize {
    let bands = thresholds.len().saturating_sub(1);
    thresholds
        .get(1..)
        .unwrap_or(&[])
        .iter()
        .position(|&upper| value < upper)
        .unwrap_or(bands.saturating_sub(1))
}

/// One named elevation layer. `lower_bound` is where the layer begins; it
/// extends up to the next layer's bound (the last layer is unbounded above).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub lower_bound: f32,
    /// RGB preview color.
    pub color: [u8; 3],
}

impl Layer {
    pub fn new(name: &str, lower_bound: f32, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            lower_bound,
            color,
        }
    }
}

/// Ordered list of layers, lowest first. Band `i` of a generated field maps to
/// `layers[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerPalette {
    layers: Vec<Layer>,
}

impl Default for LayerPalette {
    fn default() -> Self {
        Self::island()
    }
}

impl LayerPalette {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Ocean-to-snow island palette.
    pub fn island() -> Self {
        Self::new(vec![
            Layer::new("Deep Ocean", -1.00, [0, 0, 160]),
            Layer::new("Shallow Ocean", -0.45, [32, 32, 200]),
            Layer::new("Beach", -0.20, [210, 194, 144]),
            Layer::new("Grass", -0.15, [34, 139, 34]),
            Layer::new("Forest", 0.05, [17, 96, 17]),
            Layer::new("Mountain", 0.30, [80, 80, 90]),
            Layer::new("Snow", 0.70, [248, 248, 248]),
        ])
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, band: usize) -> Option<&Layer> {
        self.layers.get(band)
    }

    /// Mutable access for tweaking a single bound or color.
    pub fn layer_mut(&mut self, band: usize) -> Option<&mut Layer> {
        self.layers.get_mut(band)
    }

    /// Color for a band; magenta for bands the palette does not cover.
    pub fn color(&self, band: usize) -> [u8; 3] {
        self.layer(band).map(|l| l.color).unwrap_or([255, 0, 255])
    }

    /// Classification boundaries: every lower bound followed by `+inf`, which
    /// gives one band per layer.
    pub fn thresholds(&self) -> Vec<f32> {
        self.layers
            .iter()
            .map(|l| l.lower_bound)
            .chain(std::iter::once(f32::INFINITY))
            .collect()
    }
}
