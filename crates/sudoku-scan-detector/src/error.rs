use thiserror::Error;

/// The detector is designed to never fail: its fallback (the full-image
/// rectangle) always produces a result. This type exists for forward
/// compatibility, per §7A.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DetectorError {
    #[error(transparent)]
    Core(#[from] sudoku_scan_core::CoreError),
}
