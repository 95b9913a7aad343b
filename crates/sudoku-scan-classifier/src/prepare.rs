//! Per-glyph preparation for the classifier model (§4.3).

use image::{imageops::FilterType, GrayImage};
use ndarray::Array4;

/// Resize a glyph tile to 28x28 and normalize to float32 in `[0, 1]`, in the
/// `[1, 28, 28, 1]` layout the model expects.
pub fn prepare_input(tile: &GrayImage) -> Array4<f32> {
    let resized = image::imageops::resize(tile, 28, 28, FilterType::Triangle);
    Array4::from_shape_fn((1, 28, 28, 1), |(_, y, x, _)| {
        resized.get_pixel(x as u32, y as u32).0[0] as f32 / 255.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn normalizes_into_unit_range() {
        let tile = GrayImage::from_pixel(40, 40, Luma([255]));
        let tensor = prepare_input(&tile);
        assert_eq!(tensor.shape(), &[1, 28, 28, 1]);
        assert!((tensor[[0, 10, 10, 0]] - 1.0).abs() < 1e-6);
    }
}
