//! Rectifies a detected Sudoku grid and isolates each cell's digit glyph.

mod binarize;
mod cells;
mod error;
mod extractor;
mod floodfill;
mod morphology;
mod params;
mod rectify;

pub use error::ExtractError;
pub use extractor::{CellGlyph, GridExtractor};
pub use params::ExtractorParams;
