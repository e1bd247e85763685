//! 16-bit grayscale PNG export of the raw noise field.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};
use thiserror::Error;

use crate::terrain::TerrainField;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid value range: min ({0}) >= max ({1})")]
    InvalidValueRange(f32, f32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Value mapped to black.
    pub min_value: f32,
    /// Value mapped to white.
    pub max_value: f32,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_value: -1.0,
            max_value: 1.0,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Options spanning the field's finite value range. Falls back to the
    /// default range for fields that are entirely masked or flat.
    pub fn auto_range(field: &TerrainField) -> Self {
        match field.value_range() {
            Some((min, max)) if min < max => Self {
                min_value: min,
                max_value: max,
                ..Default::default()
            },
            _ => Self::default(),
        }
    }
}

/// Exports the raw noise values as a 16-bit grayscale PNG.
///
/// Values are clamped into `[min_value, max_value]`; masked cells come out black.
pub fn export_noise_png(
    field: &TerrainField,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let min = options.min_value;
    let max = options.max_value;

    if min >= max {
        return Err(PngExportError::InvalidValueRange(min, max));
    }

    let range = max - min;
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(field.width, field.height);

    for (x, y) in field.cell_coords() {
        let normalized = ((field.value_at(x, y) - min) / range).clamp(0.0, 1.0);
        let value = (normalized * 65535.0) as u16;
        img.put_pixel(x, y, Luma([value]));
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    // Convert u16 slice to bytes for the encoder
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());

    encoder.write_image(
        byte_slice,
        field.width,
        field.height,
        image::ExtendedColorType::L16,
    )?;

    Ok(())
}
