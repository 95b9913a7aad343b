//! Grayscale conversion and a light pyramidal blur (§4.1 step 2).

use image::{imageops::FilterType, DynamicImage, GrayImage};

/// Convert to grayscale, then downsample by half and back up, acting as a
/// cheap low-pass filter that suppresses texture noise while keeping the
/// grid's straight lines intact.
pub fn grayscale_presmooth(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let (w, h) = (gray.width(), gray.height());
    let half_w = (w / 2).max(1);
    let half_h = (h / 2).max(1);

    let down = image::imageops::resize(&gray, half_w, half_h, FilterType::Triangle);
    image::imageops::resize(&down, w, h, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn preserves_dimensions() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 48, Luma([100])));
        let out = grayscale_presmooth(&img);
        assert_eq!(out.dimensions(), (64, 48));
    }
}
