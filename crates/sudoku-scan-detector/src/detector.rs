//! The Grid Detector (§4.1): locates the quadrilateral bounding a Sudoku grid.

use image::{imageops::FilterType, DynamicImage};
use sudoku_scan_core::{canonical_quadrilateral, resize_dims, Interpolation, Point2D, Quadrilateral};

use crate::contours::outer_contours_with_children;
use crate::error::DetectorError;
use crate::params::DetectorParams;
use crate::polygon::{is_convex_quad, is_square_like, perimeter, polygon_area, simplify_douglas_peucker};
use crate::presmooth::grayscale_presmooth;
use crate::threshold::adaptive_threshold_mean;

struct Candidate {
    corners: [Point2D; 4],
    area: f64,
}

/// Finds the quadrilateral bounding a Sudoku grid in a color image.
#[derive(Clone, Debug, Default)]
pub struct GridDetector {
    params: DetectorParams,
}

impl GridDetector {
    /// Build a detector with the given tuning parameters.
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    /// Build a detector with default parameters.
    pub fn with_defaults() -> Self {
        Self::new(DetectorParams::default())
    }

    /// Locate the grid in `image`, returning its quadrilateral in
    /// source-image pixel coordinates, canonically ordered. Never fails: on
    /// an empty image or when no candidate survives the sweep, the
    /// full-image rectangle is returned.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn detect(&self, image: &DynamicImage) -> Result<Quadrilateral, DetectorError> {
        let (src_w, src_h) = (image.width(), image.height());
        if src_w == 0 || src_h == 0 {
            log::warn!("detector: empty image, returning full-image fallback");
            return Ok(Quadrilateral::full_image(1.0, 1.0));
        }

        let (work_w, work_h, interpolation) =
            resize_dims(src_w, src_h, self.params.working_resolution);
        let filter = match interpolation {
            Interpolation::Linear => FilterType::Triangle,
            Interpolation::Area => FilterType::Lanczos3,
        };
        let resized = image.resize_exact(work_w, work_h, filter);

        let scale_x = src_w as f64 / work_w as f64;
        let scale_y = src_h as f64 / work_h as f64;

        let presmoothed = grayscale_presmooth(&resized);
        let min_area = self.params.min_area_fraction
            * (self.params.working_resolution as f64)
            * (self.params.working_resolution as f64);

        for setting in &self.params.threshold_sweep {
            let binary = adaptive_threshold_mean(&presmoothed, setting.block_size, setting.c, false);
            let candidates = self.find_candidates(&binary, min_area);

            if let Some(best) = candidates.into_iter().max_by(|a, b| {
                a.area
                    .partial_cmp(&b.area)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }) {
                log::debug!(
                    "detector: candidate accepted at block_size={} c={} area={:.1}",
                    setting.block_size,
                    setting.c,
                    best.area
                );
                let reprojected = best.corners.map(|p| Point2D::new(p.x * scale_x, p.y * scale_y));
                return Ok(canonical_quadrilateral(reprojected)?);
            }
            log::trace!(
                "detector: no candidate at block_size={} c={}",
                setting.block_size,
                setting.c
            );
        }

        log::debug!("detector: threshold sweep exhausted, falling back to full-image rectangle");
        Ok(Quadrilateral::full_image(src_w as f64, src_h as f64))
    }

    fn find_candidates(&self, binary: &image::GrayImage, min_area: f64) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for outer in outer_contours_with_children(binary) {
            let points: Vec<Point2D> = outer
                .points
                .iter()
                .map(|p| Point2D::new(p.x as f64, p.y as f64))
                .collect();
            if points.len() < 4 {
                continue;
            }

            let per = perimeter(&points);
            let epsilon = self.params.polygon_epsilon_fraction * per;
            let simplified = simplify_douglas_peucker(&points, epsilon);
            if simplified.len() != 4 {
                continue;
            }
            let quad: [Point2D; 4] = [simplified[0], simplified[1], simplified[2], simplified[3]];

            if !is_convex_quad(&quad) {
                continue;
            }
            let area = polygon_area(&quad);
            if area <= min_area {
                continue;
            }
            if !is_square_like(&quad, area, per) {
                continue;
            }

            candidates.push(Candidate { corners: quad, area });
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};

    fn synthetic_grid_photo() -> DynamicImage {
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

        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn empty_image_falls_back_to_unit_square() {
        let detector = GridDetector::with_defaults();
        let img = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        let quad = detector.detect(&img).unwrap();
        assert_eq!(quad, Quadrilateral::full_image(1.0, 1.0));
    }

    #[test]
    fn never_fails_on_blank_image() {
        let detector = GridDetector::with_defaults();
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(400, 400, Luma([200])));
        let quad = detector.detect(&img).unwrap();
        // No candidate is expected on a blank image; the full-image rectangle
        // fallback must still satisfy the ordering invariants.
        assert!(quad.validate().is_ok());
    }

    #[test]
    fn finds_a_plausible_quadrilateral_on_a_synthetic_grid() {
        let detector = GridDetector::with_defaults();
        let img = synthetic_grid_photo();
        let quad = detector.detect(&img).unwrap();
        assert!(quad.validate().is_ok());
        assert!(quad.area() > 0.0);

        // `synthetic_grid_photo` draws its outermost grid line at `margin`
        // (60) and `size - margin` (540); a correctly-polarized threshold
        // should trace that boundary, not the full-image fallback or the
        // background's outer edge. Generous tolerance covers line
        // thickness and the working-resolution round trip.
        let (margin, far) = (60.0, 540.0);
        let tolerance = 30.0;
        assert!(
            (quad.tl.x - margin).abs() < tolerance && (quad.tl.y - margin).abs() < tolerance,
            "tl={:?} does not track the drawn grid boundary",
            quad.tl
        );
        assert!(
            (quad.br.x - far).abs() < tolerance && (quad.br.y - far).abs() < tolerance,
            "br={:?} does not track the drawn grid boundary",
            quad.br
        );
    }
}
