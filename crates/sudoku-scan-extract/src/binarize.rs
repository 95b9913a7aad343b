//! Gaussian adaptive thresholding of the rectified grid (§4.2 step 2).

use image::GrayImage;
use imageproc::filter::gaussian_blur_f32;

/// Binary, non-inverted adaptive threshold: a pixel becomes black (0, the
/// foreground a digit glyph occupies) when it is darker than its
/// Gaussian-weighted local neighborhood mean by at least `c`; otherwise it
/// becomes white (255, background).
pub fn adaptive_threshold_gaussian(image: &GrayImage, block_size: u32, c: i32) -> GrayImage {
    // A block of diameter `block_size` corresponds to roughly +/-3 sigma,
    // so sigma = block_size / 6 approximates the same neighborhood a
    // box-windowed adaptive threshold of that block size would use.
    let sigma = (block_size as f32 / 6.0).max(0.5);
    let local_mean = gaussian_blur_f32(image, sigma);

    let mut out = GrayImage::new(image.width(), image.height());
    for (p, (src, mean)) in out
        .pixels_mut()
        .zip(image.pixels().zip(local_mean.pixels()))
    {
        let is_digit = (src.0[0] as i32) < (mean.0[0] as i32) - c;
        p.0[0] = if is_digit { 0 } else { 255 };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn dark_blob_on_bright_field_becomes_black() {
        let mut image = GrayImage::from_pixel(60, 60, Luma([230]));
        for y in 25..35 {
            for x in 25..35 {
                image.put_pixel(x, y, Luma([10]));
            }
        }
        let out = adaptive_threshold_gaussian(&image, 53, 10);
        assert_eq!(out.get_pixel(30, 30).0[0], 0);
        assert_eq!(out.get_pixel(2, 2).0[0], 255);
    }
}
