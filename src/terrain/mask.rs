//! Radial island mask.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Distance falloff that pulls the field down toward the edges of a disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialMask {
    pub center: Vec2,
    pub radius: f32,
    pub enabled: bool,
}

impl RadialMask {
    /// Mask centered on the grid with radius `height / 2`.
    pub fn island(width: u32, height: u32) -> Self {
        Self {
            center: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
            radius: height as f32 / 2.0,
            enabled: true,
        }
    }

    /// Same disc as [`RadialMask::island`], but without the falloff.
    pub fn disabled(width: u32, height: u32) -> Self {
        Self {
            enabled: false,
            ..Self::island(width, height)
        }
    }

    /// Falloff at cell `(x, y)`.
    ///
    /// Returns `None` when the cell lies at or beyond the radius (the cell is
    /// forced to the lowest band), otherwise `distance / radius` in `[0, 1)`.
    /// The cut-off applies either way; a disabled mask only contributes no
    /// falloff inside the disc.
    pub fn falloff(&self, x: f32, y: f32) -> Option<f32> {
        let distance = self.center.distance(Vec2::new(x, y));
        if distance >= self.radius {
            None
        } else if self.enabled {
            Some(distance / self.radius)
        } else {
            Some(0.0)
        }
    }
}

/// Serializable mask settings; unset center/radius follow the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    pub enabled: bool,
    /// Mask center in cell coordinates. Defaults to the grid center.
    pub center: Option<[f32; 2]>,
    /// Mask radius in cells. Defaults to half the grid height.
    pub radius: Option<f32>,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            center: None,
            radius: None,
        }
    }
}

impl MaskConfig {
    pub fn off() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Resolves the mask for a `width` x `height` grid.
    pub fn resolve(&self, width: u32, height: u32) -> RadialMask {
        let island = RadialMask::island(width, height);
        RadialMask {
            center: self.center.map(Vec2::from).unwrap_or(island.center),
            radius: self.radius.unwrap_or(island.radius),
            enabled: self.enabled,
        }
    }
}
