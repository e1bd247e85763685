//! Layer map export: one palette color per cell.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Rgb};
use thiserror::Error;

use crate::terrain::{LayerPalette, TerrainField};

/// Errors that can occur during layer map export.
#[derive(Error, Debug)]
pub enum LayerMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Palette has {palette} layers but the field has {bands} bands")]
    PaletteMismatch { palette: usize, bands: usize },
}

/// Options for layer map export.
#[derive(Debug, Clone)]
pub struct LayerMapOptions {
    pub compression: CompressionType,
    pub filter: FilterType,
    /// Color for cells cut off by the mask; `None` uses the band 0 color.
    pub outside_color: Option<[u8; 3]>,
}

impl Default for LayerMapOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
            outside_color: None,
        }
    }
}

/// Renders the field to an RGB buffer using the palette colors.
pub fn render_layer_map(
    field: &TerrainField,
    palette: &LayerPalette,
    options: &LayerMapOptions,
) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>, LayerMapError> {
    if palette.len() < field.band_count {
        return Err(LayerMapError::PaletteMismatch {
            palette: palette.len(),
            bands: field.band_count,
        });
    }

    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(field.width, field.height);
    for (x, y) in field.cell_coords() {
        let color = match options.outside_color {
            Some(c) if field.is_outside(x, y) => c,
            _ => palette.color(field.band_at(x, y) as usize),
        };
        img.put_pixel(x, y, Rgb(color));
    }
    Ok(img)
}

/// Exports a field as an RGB PNG, one pixel per cell.
pub fn export_layer_map_png(
    field: &TerrainField,
    palette: &LayerPalette,
    path: &Path,
    options: &LayerMapOptions,
) -> Result<(), LayerMapError> {
    let img = render_layer_map(field, palette, options)?;

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        field.width,
        field.height,
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(())
}
