use thiserror::Error;

/// The façade's aggregate error, converting every lower-level crate's error
/// type. Per §7A, the FFI shim is the layer that turns these into the
/// wire-level "well-formed default or abort" policy; within Rust, callers
/// get a proper `Result`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScanError {
    #[error("failed to load image at {path}: {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("image has zero width or height")]
    EmptyImage,

    #[error(transparent)]
    Core(#[from] sudoku_scan_core::CoreError),

    #[error(transparent)]
    Detector(#[from] sudoku_scan_detector::DetectorError),

    #[error(transparent)]
    Extract(#[from] sudoku_scan_extract::ExtractError),

    #[error(transparent)]
    Classifier(#[from] sudoku_scan_classifier::ClassifierError),
}
