//! Shared geometry, grid, and image-view types for the Sudoku grid scanning
//! pipeline.
//!
//! This crate has no opinion on *how* a quadrilateral is found or a digit is
//! classified; it only fixes the vocabulary (`Quadrilateral`, `Grid`,
//! `Homography`, `GrayImageView`) the other pipeline crates share.

mod convert;
mod error;
mod geometry;
mod grid;
mod homography;
mod image_view;
pub mod logger;

pub use convert::{owned, to_grayscale, to_image_buffer, view};
pub use error::CoreError;
pub use geometry::{
    canonical_quadrilateral, order_corners, resize_dims, Interpolation, NormalizedQuadrilateral,
    Point2D, Quadrilateral,
};
pub use grid::{Cell, Grid, GRID_CELLS, GRID_SIDE};
pub use homography::{estimate_homography_rect_to_img, homography_from_4pt, warp_perspective_gray, Homography};
pub use image_view::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView};
