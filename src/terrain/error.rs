use thiserror::Error;

/// Errors that can occur when generating a terrain field.
///
/// All of them are usage errors detected before any cell is computed, so a
/// failed call never yields a partial field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("Invalid dimensions: {width}x{height} (width and height must be positive)")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),
    #[error("Invalid frequency: {0} (must be a positive finite number)")]
    InvalidFrequency(f32),
}
