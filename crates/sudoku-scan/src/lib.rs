//! Extracts a 9x9 Sudoku puzzle from a photograph: detect the grid, rectify
//! and segment it, and classify each cell's digit.
//!
//! This crate assembles [`sudoku_scan_detector`], [`sudoku_scan_extract`],
//! and [`sudoku_scan_classifier`] behind the [`Scanner`] façade. The stable
//! C ABI lives in the separate `sudoku-scan-ffi` crate.

mod error;
mod facade;
mod io;

pub use error::ScanError;
pub use facade::Scanner;
pub use io::load;

pub use sudoku_scan_classifier::set_model;
pub use sudoku_scan_core::{Cell, Grid, NormalizedQuadrilateral, Point2D, Quadrilateral};
