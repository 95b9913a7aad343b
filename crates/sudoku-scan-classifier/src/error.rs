use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClassifierError {
    #[error("classifier model path not configured; call set_model before classifying")]
    ModelNotConfigured,

    #[error("failed to load classifier model: {0}")]
    ModelLoadFailed(#[from] ort::Error),

    #[error("inference failed: {0}")]
    InferenceFailed(ort::Error),
}
