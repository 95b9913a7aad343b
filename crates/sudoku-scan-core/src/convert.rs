//! Bridges between the `image` crate's owned buffers and the borrowed
//! [`GrayImageView`]/[`GrayImage`] views the geometry code operates on.

use image::{DynamicImage, GrayImage as ImageGrayImage};

use crate::{CoreError, GrayImage, GrayImageView};

/// Convert any loaded image to 8-bit grayscale, grounding the conversion
/// rule in `image`'s own luma conversion rather than hand-rolling one.
pub fn to_grayscale(image: &DynamicImage) -> ImageGrayImage {
    image.to_luma8()
}

/// Borrow an `image::GrayImage` as a [`GrayImageView`] without copying.
pub fn view(image: &ImageGrayImage) -> Result<GrayImageView<'_>, CoreError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CoreError::EmptyImage);
    }
    Ok(GrayImageView {
        width: width as usize,
        height: height as usize,
        data: image.as_raw(),
    })
}

/// Copy an `image::GrayImage` into an owned [`GrayImage`].
pub fn owned(image: &ImageGrayImage) -> Result<GrayImage, CoreError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CoreError::EmptyImage);
    }
    Ok(GrayImage {
        width: width as usize,
        height: height as usize,
        data: image.as_raw().clone(),
    })
}

/// Convert an owned [`GrayImage`] back into an `image::GrayImage` for
/// saving, further `image`/`imageproc` processing, or classifier input prep.
pub fn to_image_buffer(gray: &GrayImage) -> Option<ImageGrayImage> {
    ImageGrayImage::from_raw(gray.width as u32, gray.height as u32, gray.data.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn view_rejects_empty_image() {
        let empty = ImageGrayImage::new(0, 0);
        assert!(view(&empty).is_err());
    }

    #[test]
    fn round_trips_through_owned_buffer() {
        let mut img = ImageGrayImage::new(4, 2);
        img.put_pixel(1, 1, Luma([200]));
        let owned_gray = owned(&img).unwrap();
        let back = to_image_buffer(&owned_gray).unwrap();
        assert_eq!(back.get_pixel(1, 1).0[0], 200);
    }
}
