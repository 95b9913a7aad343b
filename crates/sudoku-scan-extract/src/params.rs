//! Tunable constants for the extractor pipeline (§4.2, §9A).

/// Extractor tuning parameters, constructible independently of any global
/// state for testing. The flood-fill thresholds are empirically tuned
/// defaults (§9 Open Questions), not hard-coded magic numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractorParams {
    /// Side length of the rectified square raster; `rectified_side / 9` is
    /// the per-cell size in pixels.
    pub rectified_side: u32,
    /// Adaptive Gaussian threshold block size used on the rectified image.
    pub binarize_block_size: u32,
    /// Adaptive Gaussian threshold mean offset.
    pub binarize_c: i32,
    /// Fraction of cell size used as the horizontal grid-line removal
    /// structuring element's width.
    pub horizontal_line_fraction: f64,
    /// Fraction of cell size used as the vertical grid-line removal
    /// structuring element's height.
    pub vertical_line_fraction: f64,
    /// Fraction of cell size used as the side of the centered scan window
    /// that seeds flood fill.
    pub scan_window_fraction: f64,
    /// Minimum pixel count for a flood-filled component to be considered a
    /// digit glyph rather than noise.
    pub min_component_pixels: usize,
    /// Accepted glyph bounding-box height range, as a fraction of cell size.
    pub height_fraction_range: (f64, f64),
    /// Accepted glyph bounding-box width range, as a fraction of cell size.
    pub width_fraction_range: (f64, f64),
    /// Padding, in pixels, added around the glyph's squared bounding box.
    pub glyph_padding_px: i64,
}

impl ExtractorParams {
    /// Per-cell size in pixels, derived from `rectified_side`.
    pub fn cell_size(&self) -> f64 {
        self.rectified_side as f64 / 9.0
    }
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            rectified_side: 450,
            binarize_block_size: 53,
            binarize_c: 10,
            horizontal_line_fraction: 0.8,
            vertical_line_fraction: 0.9,
            scan_window_fraction: 1.0 / 3.0,
            min_component_pixels: 35,
            height_fraction_range: (0.2, 0.9),
            width_fraction_range: (0.1, 0.8),
            glyph_padding_px: 2,
        }
    }
}
