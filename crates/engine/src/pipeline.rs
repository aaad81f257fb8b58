use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::assemble::assemble_text;
use crate::recognizer::{OcrBackend, OcrError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("Recognition task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Orchestrates: existence check → recognize (blocking pool) → filter + join.
///
/// Cheap to clone; every clone shares the same engine handle.
#[derive(Clone)]
pub struct PageReader {
    recognizer: Arc<dyn OcrBackend>,
}

impl PageReader {
    pub fn new(recognizer: impl OcrBackend + 'static) -> Self {
        Self { recognizer: Arc::new(recognizer) }
    }

    pub fn from_shared(recognizer: Arc<dyn OcrBackend>) -> Self {
        Self { recognizer }
    }

    /// Extract the confident text of the page image at `path`.
    pub async fn read_page(&self, path: &Path) -> Result<String, PipelineError> {
        let is_file = tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(PipelineError::NotFound(path.to_path_buf()));
        }

        let recognizer = Arc::clone(&self.recognizer);
        let owned = path.to_path_buf();
        let fragments = tokio::task::spawn_blocking(move || recognizer.recognize(&owned)).await??;

        let text = assemble_text(&fragments);
        tracing::info!(path = %path.display(), fragments = fragments.len(), "processing");
        Ok(text)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
