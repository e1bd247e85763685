//! RAW dumps of the noise field for external tools and diffing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::terrain::TerrainField;

/// Errors that can occur during RAW export.
#[derive(Error, Debug)]
pub enum RawExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid value range: min ({0}) >= max ({1})")]
    InvalidValueRange(f32, f32),
}

/// RAW export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawFormat {
    /// 16-bit unsigned integer, little-endian.
    #[default]
    R16LittleEndian,
    /// 16-bit unsigned integer, big-endian.
    R16BigEndian,
    /// 32-bit float, little-endian. Masked cells keep their `-inf` marker.
    R32Float,
}

/// Writes the field's raw values in row-major order.
///
/// R16 formats normalize `[min_value, max_value]` to `0..=65535`; R32 writes
/// values untouched and ignores the range.
pub fn export_noise_raw(
    field: &TerrainField,
    path: &Path,
    format: RawFormat,
    min_value: f32,
    max_value: f32,
) -> Result<(), RawExportError> {
    if format != RawFormat::R32Float && min_value >= max_value {
        return Err(RawExportError::InvalidValueRange(min_value, max_value));
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let range = max_value - min_value;
    let to_u16 = |v: f32| (((v - min_value) / range).clamp(0.0, 1.0) * 65535.0) as u16;

    match format {
        RawFormat::R16LittleEndian => {
            for &v in &field.values {
                writer.write_all(&to_u16(v).to_le_bytes())?;
            }
        }
        RawFormat::R16BigEndian => {
            for &v in &field.values {
                writer.write_all(&to_u16(v).to_be_bytes())?;
            }
        }
        RawFormat::R32Float => {
            for &v in &field.values {
                writer.write_all(&v.to_le_bytes())?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Returns the expected file size for a RAW export.
pub fn expected_file_size(width: u32, height: u32, format: RawFormat) -> u64 {
    let cells = (width as u64) * (height as u64);
    match format {
        RawFormat::R16LittleEndian | RawFormat::R16BigEndian => cells * 2,
        RawFormat::R32Float => cells * 4,
    }
}
