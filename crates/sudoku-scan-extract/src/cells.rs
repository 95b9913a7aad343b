//! Per-cell digit glyph isolation and tiling (§4.2 steps 4-5).

use image::GrayImage;

use crate::floodfill::flood_fill_dark_component;
use crate::params::ExtractorParams;

struct BBox {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl BBox {
    fn from_points(points: &[(u32, u32)]) -> Self {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Self { min_x, min_y, max_x, max_y }
    }

    fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) as f64 / 2.0,
            (self.min_y + self.max_y) as f64 / 2.0,
        )
    }
}

/// Find and crop the digit glyph tile for the cell at `(row, col)` (both
/// `0..9`), destructively marking scanned pixels of `cleaned` visited.
/// Returns `None` if no qualifying glyph is found (the cell is blank).
pub fn isolate_glyph(
    cleaned: &mut GrayImage,
    rectified_gray: &GrayImage,
    row: usize,
    col: usize,
    params: &ExtractorParams,
) -> Option<GrayImage> {
    let cell_size = params.cell_size();
    let cx = (col as f64 + 0.5) * cell_size;
    let cy = (row as f64 + 0.5) * cell_size;
    let half_window = params.scan_window_fraction * cell_size / 2.0;

    let (w, h) = cleaned.dimensions();
    let x0 = ((cx - half_window).floor().max(0.0)) as u32;
    let y0 = ((cy - half_window).floor().max(0.0)) as u32;
    let x1 = ((cx + half_window).ceil() as u32).min(w.saturating_sub(1));
    let y1 = ((cy + half_window).ceil() as u32).min(h.saturating_sub(1));

    let mut best: Option<BBox> = None;

    for y in y0..=y1 {
        for x in x0..=x1 {
            if cleaned.get_pixel(x, y).0[0] != 0 {
                continue;
            }
            let component = flood_fill_dark_component(cleaned, x, y);
            if component.len() < params.min_component_pixels {
                continue;
            }
            let bbox = BBox::from_points(&component);
            let height_frac = bbox.height() as f64 / cell_size;
            let width_frac = bbox.width() as f64 / cell_size;
            let (h_lo, h_hi) = params.height_fraction_range;
            let (w_lo, w_hi) = params.width_fraction_range;
            if height_frac < h_lo || height_frac > h_hi || width_frac < w_lo || width_frac > w_hi {
                continue;
            }
            if best.as_ref().map(|b| bbox.area() > b.area()).unwrap_or(true) {
                best = Some(bbox);
            }
        }
    }

    let bbox = best?;
    Some(crop_square_tile(rectified_gray, &bbox, params.glyph_padding_px))
}

/// Expand a bounding box to a square (centering the shorter dimension), pad
/// it, and crop that region from the grayscale source, clamped to bounds.
fn crop_square_tile(source: &GrayImage, bbox: &BBox, padding_px: i64) -> GrayImage {
    let (cx, cy) = bbox.center();
    let side = bbox.width().max(bbox.height()) as i64 + 2 * padding_px;
    let (src_w, src_h) = source.dimensions();

    let left = (cx - side as f64 / 2.0).round() as i64;
    let top = (cy - side as f64 / 2.0).round() as i64;

    let clamped_left = left.clamp(0, src_w as i64 - 1);
    let clamped_top = top.clamp(0, src_h as i64 - 1);
    let right = (left + side).clamp(clamped_left + 1, src_w as i64);
    let bottom = (top + side).clamp(clamped_top + 1, src_h as i64);

    let crop_w = (right - clamped_left) as u32;
    let crop_h = (bottom - clamped_top) as u32;

    image::imageops::crop_imm(source, clamped_left as u32, clamped_top as u32, crop_w, crop_h)
        .to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn rectified_with_digit(cell_size: u32, row: usize, col: usize) -> (GrayImage, GrayImage) {
        let side = cell_size * 9;
        let gray = GrayImage::from_pixel(side, side, Luma([230]));
        let mut binary = GrayImage::from_pixel(side, side, Luma([255]));

        let cx = col as u32 * cell_size + cell_size / 2;
        let cy = row as u32 * cell_size + cell_size / 2;
        let r = cell_size / 6;
        for y in (cy - r)..(cy + r) {
            for x in (cx - r)..(cx + r) {
                binary.put_pixel(x, y, Luma([0]));
            }
        }
        (gray, binary)
    }

    #[test]
    fn isolates_a_glyph_in_the_expected_cell() {
        let params = ExtractorParams::default();
        let cell_size = params.cell_size() as u32;
        let (gray, mut binary) = rectified_with_digit(cell_size, 3, 4);

        let tile = isolate_glyph(&mut binary, &gray, 3, 4, &params);
        assert!(tile.is_some());
    }

    #[test]
    fn empty_cell_yields_no_glyph() {
        let params = ExtractorParams::default();
        let cell_size = params.cell_size() as u32;
        let side = cell_size * 9;
        let gray = GrayImage::from_pixel(side, side, Luma([230]));
        let mut binary = GrayImage::from_pixel(side, side, Luma([255]));

        let tile = isolate_glyph(&mut binary, &gray, 0, 0, &params);
        assert!(tile.is_none());
    }
}
