//! The Grid Extractor (§4.2): rectifies a detected quadrilateral and isolates
//! each cell's digit glyph tile. Classification itself is the caller's job
//! (the façade), since it is the one component backed by a loaded model.

use image::{DynamicImage, GrayImage};
use sudoku_scan_core::Quadrilateral;

use crate::binarize::adaptive_threshold_gaussian;
use crate::cells::isolate_glyph;
use crate::error::ExtractError;
use crate::morphology::remove_grid_lines;
use crate::params::ExtractorParams;
use crate::rectify::rectify;

/// A non-blank cell's isolated digit glyph, ready for classification.
pub struct CellGlyph {
    pub row: usize,
    pub col: usize,
    pub tile: GrayImage,
}

/// Rectifies the quadrilateral region of an image and isolates each cell's
/// digit glyph.
#[derive(Clone, Debug, Default)]
pub struct GridExtractor {
    params: ExtractorParams,
}

impl GridExtractor {
    pub fn new(params: ExtractorParams) -> Self {
        Self { params }
    }

    pub fn with_defaults() -> Self {
        Self::new(ExtractorParams::default())
    }

    /// Rectify `image` within `quad` and isolate every non-blank cell's
    /// glyph tile, in row-major order.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn extract(&self, image: &DynamicImage, quad: &Quadrilateral) -> Result<Vec<CellGlyph>, ExtractError> {
        quad.validate()?;

        let gray = image.to_luma8();
        let rectified = rectify(&gray, quad, self.params.rectified_side)?;

        let binary = adaptive_threshold_gaussian(
            &rectified,
            self.params.binarize_block_size,
            self.params.binarize_c,
        );
        let mut cleaned = remove_grid_lines(
            &binary,
            self.params.cell_size(),
            self.params.horizontal_line_fraction,
            self.params.vertical_line_fraction,
        );

        let mut glyphs = Vec::new();
        for row in 0..9 {
            for col in 0..9 {
                if let Some(tile) = isolate_glyph(&mut cleaned, &rectified, row, col, &self.params) {
                    log::trace!("extractor: glyph found at ({row}, {col})");
                    glyphs.push(CellGlyph { row, col, tile });
                }
            }
        }
        log::debug!("extractor: isolated {} non-blank cells", glyphs.len());

        Ok(glyphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use sudoku_scan_core::Point2D;

    fn blank_photo(side: u32) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(side, side, Luma([230])))
    }

    #[test]
    fn blank_grid_yields_no_glyphs() {
        let extractor = GridExtractor::with_defaults();
        let photo = blank_photo(500);
        let quad = Quadrilateral::full_image(500.0, 500.0);
        let glyphs = extractor.extract(&photo, &quad).unwrap();
        assert!(glyphs.is_empty());
    }

    #[test]
    fn rejects_degenerate_quadrilateral() {
        let extractor = GridExtractor::with_defaults();
        let photo = blank_photo(200);
        let degenerate = Quadrilateral {
            tl: Point2D::new(0.0, 0.0),
            tr: Point2D::new(0.0, 0.0),
            bl: Point2D::new(0.0, 100.0),
            br: Point2D::new(100.0, 100.0),
        };
        assert!(extractor.extract(&photo, &degenerate).is_err());
    }
}
