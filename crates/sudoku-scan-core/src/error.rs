use thiserror::Error;

/// Errors shared by the geometry and grid types used across every crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    #[error("degenerate quadrilateral: {reason}")]
    DegenerateQuadrilateral { reason: &'static str },

    #[error("cell value {value} out of range, expected 0..=9")]
    InvalidCellValue { value: u8 },

    #[error("cell index ({x}, {y}) out of range, expected 0..9")]
    CellIndexOutOfRange { x: usize, y: usize },

    #[error("image has zero width or height")]
    EmptyImage,
}
