//! Process-wide classifier backend lifecycle (§4.3, §5, §6, §9 design notes).
//!
//! The model path is set once via [`set_model`]; the inference session is
//! then built lazily on the first classify call and lives for the rest of
//! the process, guarded by a mutex so concurrent calls serialize rather
//! than race, matching the shared-state model in §5.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use image::GrayImage;
use ort::session::Session;
use ort::value::Value;

use crate::error::ClassifierError;
use crate::prepare::prepare_input;

static MODEL_PATH: Mutex<Option<PathBuf>> = Mutex::new(None);
static SESSION: OnceLock<Mutex<Session>> = OnceLock::new();

/// Register the path to the classifier model. Must be called before the
/// first classification; this is the one piece of genuinely process-wide
/// configuration in the pipeline.
pub fn set_model(path: impl AsRef<Path>) {
    *MODEL_PATH.lock().expect("model path mutex poisoned") = Some(path.as_ref().to_path_buf());
}

fn session() -> Result<&'static Mutex<Session>, ClassifierError> {
    if let Some(session) = SESSION.get() {
        return Ok(session);
    }

    let path = MODEL_PATH
        .lock()
        .expect("model path mutex poisoned")
        .clone()
        .ok_or(ClassifierError::ModelNotConfigured)?;

    let built = build_session(&path)?;
    Ok(SESSION.get_or_init(|| Mutex::new(built)))
}

fn build_session(path: &Path) -> Result<Session, ClassifierError> {
    // Register whatever accelerated execution providers this build of `ort`
    // was compiled with; on a build with none configured (or at runtime if
    // the provider's native library is missing) registration is a no-op and
    // `ort` transparently falls back to its CPU provider, so the explicit
    // retry below only needs to cover outright commit failure.
    let accelerated = Session::builder()
        .and_then(|b| b.with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3))
        .and_then(|b| b.commit_from_file(path));

    match accelerated {
        Ok(session) => {
            log::info!("classifier: model loaded, optimization level 3");
            Ok(session)
        }
        Err(err) => {
            log::warn!("classifier: accelerated session init failed ({err}), retrying CPU-only");
            let session = Session::builder()?.with_intra_threads(4)?.commit_from_file(path)?;
            Ok(session)
        }
    }
}

/// A single non-blank cell's isolated glyph tile, ready for classification.
pub struct GlyphTile<'a> {
    pub row: usize,
    pub col: usize,
    pub image: &'a GrayImage,
}

/// A cell's classified digit, `1..=9` (never `0`: blank cells never reach
/// the classifier, per §4.3).
pub struct ClassifiedCell {
    pub row: usize,
    pub col: usize,
    pub digit: u8,
}

/// Classify every glyph tile in `tiles`, holding the session lock for the
/// whole batch so calls from other threads serialize around it rather than
/// interleaving individual inferences.
pub fn predict_batch(tiles: &[GlyphTile<'_>]) -> Result<Vec<ClassifiedCell>, ClassifierError> {
    let session_lock = session()?;
    let mut session = session_lock.lock().expect("session mutex poisoned");

    let mut results = Vec::with_capacity(tiles.len());
    for tile in tiles {
        let digit = classify_one(&mut session, tile.image)?;
        results.push(ClassifiedCell {
            row: tile.row,
            col: tile.col,
            digit,
        });
    }
    Ok(results)
}

fn classify_one(session: &mut Session, tile: &GrayImage) -> Result<u8, ClassifierError> {
    let input = prepare_input(tile);
    let inputs = ort::inputs![
        "input" => Value::from_array(input).map_err(ClassifierError::InferenceFailed)?
    ]
    .map_err(ClassifierError::InferenceFailed)?;

    let outputs = session.run(inputs).map_err(ClassifierError::InferenceFailed)?;
    let scores = outputs["output"]
        .try_extract_tensor::<f32>()
        .map_err(ClassifierError::InferenceFailed)?;

    let (best_index, _) = scores
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .expect("model output is non-empty");

    Ok(best_index as u8 + 1)
}
