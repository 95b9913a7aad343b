use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    #[error("quadrilateral invalid for extraction: {0}")]
    InvalidQuadrilateral(#[from] sudoku_scan_core::CoreError),

    #[error("perspective warp failed: homography could not be computed from the given corners")]
    PerspectiveWarpFailed,
}
