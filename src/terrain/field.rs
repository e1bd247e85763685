//! Terrain field: per-cell layer bands plus the raw noise they came from.

/// Raw value recorded for cells outside the mask.
pub const OUTSIDE_VALUE: f32 = f32::NEG_INFINITY;

/// A generated `width` x `height` grid, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainField {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Seed the field was generated with.
    pub seed: u32,
    /// Number of classification bands (thresholds - 1).
    pub band_count: usize,
    /// Band index per cell, each in `[0, band_count)`.
    pub bands: Vec<u32>,
    /// Masked fractal noise per cell; [`OUTSIDE_VALUE`] outside the mask.
    pub values: Vec<f32>,
}

impl TerrainField {
    /// Creates a field with every cell in band 0 and value 0.0.
    pub fn new(width: u32, height: u32, seed: u32, band_count: usize) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            seed,
            band_count,
            bands: vec![0; size],
            values: vec![0.0; size],
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize) * (self.width as usize) + x as usize
    }

    /// Band at the given cell.
    ///
    /// # Panics
    /// Panics if x or y is out of bounds.
    pub fn band_at(&self, x: u32, y: u32) -> u32 {
        self.bands[self.offset(x, y)]
    }

    /// Raw value at the given cell.
    ///
    /// # Panics
    /// Panics if x or y is out of bounds.
    pub fn value_at(&self, x: u32, y: u32) -> f32 {
        self.values[self.offset(x, y)]
    }

    /// True if the cell was cut off by the mask.
    pub fn is_outside(&self, x: u32, y: u32) -> bool {
        self.value_at(x, y) == OUTSIDE_VALUE
    }

    pub fn cell_count(&self) -> usize {
        self.bands.len()
    }

    /// Band indices of row `y`.
    pub fn band_row(&self, y: u32) -> &[u32] {
        let start = self.offset(0, y);
        &self.bands[start..start + self.width as usize]
    }

    /// (min, max) over finite values, or `None` if every cell is outside.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }

    /// Number of cells in each band.
    pub fn band_histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.band_count];
        for &band in &self.bands {
            if let Some(count) = counts.get_mut(band as usize) {
                *count += 1;
            }
        }
        counts
    }

    /// Iterator over all (x, y) cell coordinates in row-major order.
    pub fn cell_coords(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }
}
