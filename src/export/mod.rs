//! Export module for saving terrain fields to image and binary formats.
//!
//! The layer map is the rendered island; the noise PNG and RAW dumps expose
//! the raw per-cell values for inspection.

mod layer_map;
mod png;
mod raw;

pub use layer_map::{export_layer_map_png, render_layer_map, LayerMapError, LayerMapOptions};
pub use png::{export_noise_png, PngExportError, PngExportOptions};
pub use raw::{expected_file_size, export_noise_raw, RawExportError, RawFormat};
