//! Image I/O adapter (§2 component 1): decode a file path to a raster image.

use std::path::Path;

use image::DynamicImage;

use crate::error::ScanError;

/// Load an image from `path`, reporting decode failures and empty results
/// rather than panicking.
pub fn load(path: impl AsRef<Path>) -> Result<DynamicImage, ScanError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| ScanError::ImageLoad {
        path: path.display().to_string(),
        source,
    })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(ScanError::EmptyImage);
    }
    Ok(image)
}
