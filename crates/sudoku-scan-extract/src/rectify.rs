//! Perspective rectification of a detected quadrilateral (§4.2 step 1).

use image::GrayImage;
use nalgebra::Point2;
use sudoku_scan_core::{homography_from_4pt, view, warp_perspective_gray, Quadrilateral};

use crate::error::ExtractError;

/// Warp the quadrilateral region of `gray` into a `side x side` square
/// raster, mapping `quad`'s four corners onto the square's corners in the
/// same TL/TR/BL/BR order.
pub fn rectify(gray: &GrayImage, quad: &Quadrilateral, side: u32) -> Result<GrayImage, ExtractError> {
    let side_f = side as f32;
    let rect_corners = [
        Point2::new(0.0_f32, 0.0),
        Point2::new(side_f, 0.0),
        Point2::new(0.0_f32, side_f),
        Point2::new(side_f, side_f),
    ];
    let img_corners = [
        Point2::new(quad.tl.x as f32, quad.tl.y as f32),
        Point2::new(quad.tr.x as f32, quad.tr.y as f32),
        Point2::new(quad.bl.x as f32, quad.bl.y as f32),
        Point2::new(quad.br.x as f32, quad.br.y as f32),
    ];

    let homography = homography_from_4pt(&rect_corners, &img_corners)
        .ok_or(ExtractError::PerspectiveWarpFailed)?;

    let src_view = view(gray).map_err(ExtractError::InvalidQuadrilateral)?;
    let rectified = warp_perspective_gray(&src_view, homography, side as usize, side as usize);

    image::GrayImage::from_raw(side, side, rectified.data).ok_or(ExtractError::PerspectiveWarpFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use sudoku_scan_core::Point2D;

    #[test]
    fn rectifies_a_full_image_quad_to_the_same_content() {
        let mut gray = GrayImage::from_pixel(100, 100, Luma([200]));
        gray.put_pixel(50, 50, Luma([10]));

        let quad = Quadrilateral::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(100.0, 0.0),
            Point2D::new(0.0, 100.0),
            Point2D::new(100.0, 100.0),
        )
        .unwrap();

        let rectified = rectify(&gray, &quad, 100).unwrap();
        assert_eq!(rectified.dimensions(), (100, 100));
        assert_eq!(rectified.get_pixel(50, 50).0[0], 10);
    }
}
