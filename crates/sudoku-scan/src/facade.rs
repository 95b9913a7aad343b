//! The Scanner façade (§4.4): assembles Detector + Extractor (+ Classifier)
//! into the three operations exposed across the FFI boundary.

use image::DynamicImage;
use sudoku_scan_classifier::GlyphTile;
use sudoku_scan_core::{Grid, NormalizedQuadrilateral, Quadrilateral};
use sudoku_scan_detector::{DetectorParams, GridDetector};
use sudoku_scan_extract::{ExtractorParams, GridExtractor};

use crate::error::ScanError;
use crate::io;

/// Orchestrates grid detection, rectification/segmentation, and digit
/// classification.
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    detector: GridDetector,
    extractor: GridExtractor,
}

impl Scanner {
    /// Build a scanner with the given component parameters.
    pub fn new(detector_params: DetectorParams, extractor_params: ExtractorParams) -> Self {
        Self {
            detector: GridDetector::new(detector_params),
            extractor: GridExtractor::new(extractor_params),
        }
    }

    /// Build a scanner with every component's default parameters.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Locate the grid quadrilateral in an already-loaded image.
    pub fn detect(&self, image: &DynamicImage) -> Result<Quadrilateral, ScanError> {
        Ok(self.detector.detect(image)?)
    }

    /// Rectify and classify the grid bounded by `quad` in an already-loaded
    /// image, producing the 81-cell digit grid.
    pub fn extract(&self, image: &DynamicImage, quad: &Quadrilateral) -> Result<Grid, ScanError> {
        let glyphs = self.extractor.extract(image, quad)?;
        let tiles: Vec<GlyphTile<'_>> = glyphs
            .iter()
            .map(|g| GlyphTile {
                row: g.row,
                col: g.col,
                image: &g.tile,
            })
            .collect();

        let classified = sudoku_scan_classifier::predict_batch(&tiles)?;

        let mut grid = Grid::blank();
        for cell in classified {
            let value = sudoku_scan_core::Cell::new(cell.digit)?;
            grid.set(cell.col, cell.row, value)?;
        }
        Ok(grid)
    }

    /// `detect_grid(path)`: load the image, detect the grid, and report its
    /// quadrilateral normalized to `[0, 1]`. An unreadable or empty image
    /// yields the well-formed unit-square default rather than an error
    /// (§7), since this operation crosses the FFI boundary.
    pub fn detect_grid(&self, path: impl AsRef<std::path::Path>) -> Result<NormalizedQuadrilateral, ScanError> {
        let image = match io::load(path) {
            Ok(image) => image,
            Err(ScanError::EmptyImage) | Err(ScanError::ImageLoad { .. }) => {
                log::warn!("detect_grid: image unreadable or empty, returning unit square");
                return Ok(NormalizedQuadrilateral::UNIT_SQUARE);
            }
            Err(other) => return Err(other),
        };

        let quad = self.detect(&image)?;
        Ok(quad.normalize(image.width() as f64, image.height() as f64))
    }

    /// `extract_grid(path, normalized_quad)`: load the image, scale the
    /// normalized quadrilateral to pixel space, and extract the digit grid.
    /// An unreadable or empty image yields an all-blank grid; a malformed
    /// quadrilateral is a genuine error (§7: fatal at the FFI boundary,
    /// propagated as `Err` here so only the FFI shim decides to abort).
    pub fn extract_grid(
        &self,
        path: impl AsRef<std::path::Path>,
        normalized_quad: NormalizedQuadrilateral,
    ) -> Result<Grid, ScanError> {
        let image = match io::load(path) {
            Ok(image) => image,
            Err(ScanError::EmptyImage) | Err(ScanError::ImageLoad { .. }) => {
                log::warn!("extract_grid: image unreadable or empty, returning blank grid");
                return Ok(Grid::blank());
            }
            Err(other) => return Err(other),
        };

        let quad = normalized_quad.to_pixels(image.width() as f64, image.height() as f64);
        self.extract(&image, &quad)
    }

    /// `extract_grid_from_roi(path, roi_side, roi_offset_y)`: crop a square
    /// region of interest centered horizontally and offset vertically from
    /// the image center, then detect and extract within that crop.
    pub fn extract_grid_from_roi(
        &self,
        path: impl AsRef<std::path::Path>,
        roi_side: u32,
        roi_offset_y: i64,
    ) -> Result<Grid, ScanError> {
        let image = match io::load(path) {
            Ok(image) => image,
            Err(ScanError::EmptyImage) | Err(ScanError::ImageLoad { .. }) => {
                log::warn!("extract_grid_from_roi: image unreadable or empty, returning blank grid");
                return Ok(Grid::blank());
            }
            Err(other) => return Err(other),
        };

        let crop = crop_roi(&image, roi_side, roi_offset_y);
        let quad = self.detect(&crop)?;
        self.extract(&crop, &quad)
    }
}

fn crop_roi(image: &DynamicImage, roi_side: u32, roi_offset_y: i64) -> DynamicImage {
    let (w, h) = (image.width() as i64, image.height() as i64);
    let side = (roi_side as i64).clamp(1, w.min(h));

    let cx = w / 2;
    let cy = h / 2 + roi_offset_y;

    let left = (cx - side / 2).clamp(0, w - side);
    let top = (cy - side / 2).clamp(0, h - side);

    image.crop_imm(left as u32, top as u32, side as u32, side as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn crop_roi_stays_within_image_bounds() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(200, 100, Luma([200])));
        let crop = crop_roi(&image, 500, 1000);
        assert_eq!(crop.width(), 100);
        assert_eq!(crop.height(), 100);
    }

    #[test]
    fn detect_grid_on_missing_file_returns_unit_square() {
        let scanner = Scanner::with_defaults();
        let quad = scanner.detect_grid("/nonexistent/path/does-not-exist.png").unwrap();
        assert_eq!(quad, NormalizedQuadrilateral::UNIT_SQUARE);
    }

    #[test]
    fn extract_grid_on_missing_file_returns_blank_grid() {
        let scanner = Scanner::with_defaults();
        let grid = scanner
            .extract_grid("/nonexistent/path/does-not-exist.png", NormalizedQuadrilateral::UNIT_SQUARE)
            .unwrap();
        assert_eq!(grid, Grid::blank());
    }

    /// A synthetic photo of a 9x9 grid, written to a temp file so it can be
    /// round-tripped through `detect_grid`'s path-based API.
    fn synthetic_grid_file() -> tempfile::TempPath {
        let size = 600u32;
        let mut img = GrayImage::from_pixel(size, size, Luma([230]));
        let (margin, thickness) = (60i64, 4i64);
        let (lo, hi) = (margin, size as i64 - margin);

        let draw_line = |img: &mut GrayImage, is_horizontal: bool, pos: i64| {
            for t in -thickness..=thickness {
                for c in lo..hi {
                    let (x, y) = if is_horizontal { (c, pos + t) } else { (pos + t, c) };
                    if x >= 0 && y >= 0 && (x as u32) < size && (y as u32) < size {
                        img.put_pixel(x as u32, y as u32, Luma([20]));
                    }
                }
            }
        };

        for i in 0..=9 {
            let pos = lo + i * (hi - lo) / 9;
            draw_line(&mut img, true, pos);
            draw_line(&mut img, false, pos);
        }

        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        img.save(file.path()).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn detect_grid_bbox_coordinates_stay_within_unit_square() {
        let scanner = Scanner::with_defaults();
        let path = synthetic_grid_file();
        let quad = scanner.detect_grid(&path).unwrap();
        for corner in [quad.tl, quad.tr, quad.bl, quad.br] {
            assert!((0.0..=1.0).contains(&corner.x), "x={}", corner.x);
            assert!((0.0..=1.0).contains(&corner.y), "y={}", corner.y);
        }
    }

    #[test]
    fn detect_grid_is_deterministic() {
        let scanner = Scanner::with_defaults();
        let path = synthetic_grid_file();
        let first = scanner.detect_grid(&path).unwrap();
        let second = scanner.detect_grid(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn extract_grid_is_deterministic() {
        let scanner = Scanner::with_defaults();
        let path = synthetic_grid_file();
        let quad = scanner.detect_grid(&path).unwrap();
        let first = scanner.extract_grid(&path, quad).unwrap();
        let second = scanner.extract_grid(&path, quad).unwrap();
        assert_eq!(first, second);
    }
}
