use std::path::Path;
use thiserror::Error;

use crate::types::Fragment;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations read the image at `path` and return the recognized
/// fragments in reading order.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, path: &Path) -> Result<Vec<Fragment>, OcrError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set list of fragments — useful for exercising the server
/// without requiring Tesseract to be installed.
pub struct MockRecognizer {
    pub fragments: Vec<Fragment>,
}

impl MockRecognizer {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _path: &Path) -> Result<Vec<Fragment>, OcrError> {
        Ok(self.fragments.clone())
    }
}

/// Always fails; stands in for a broken engine.
pub struct FailingRecognizer {
    pub message: String,
}

impl FailingRecognizer {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl OcrBackend for FailingRecognizer {
    fn recognize(&self, _path: &Path) -> Result<Vec<Fragment>, OcrError> {
        Err(OcrError::Engine(self.message.clone()))
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use std::path::Path;

    use super::{OcrBackend, OcrError};
    use crate::preprocess;
    use crate::tsv::parse_tsv;
    use crate::types::Fragment;
    use leptess::LepTess;

    /// CPU-only Tesseract engine. A `LepTess` handle is not thread-safe, so
    /// one is built per call from the stored settings.
    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        /// Validates the language set by initializing the engine once.
        pub fn new(data_path: Option<String>, languages: &[String]) -> Result<Self, OcrError> {
            let recognizer = Self { data_path, lang: languages.join("+") };
            recognizer.engine()?;
            tracing::info!(lang = %recognizer.lang, "tesseract engine ready");
            Ok(recognizer)
        }

        fn engine(&self) -> Result<LepTess, OcrError> {
            LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, path: &Path) -> Result<Vec<Fragment>, OcrError> {
            let image_bytes = preprocess::prepare_for_ocr(path)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            let mut lt = self.engine()?;
            lt.set_image_from_mem(&image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            let tsv = lt.get_tsv_text(0).map_err(|e| OcrError::Engine(e.to_string()))?;
            Ok(parse_tsv(&tsv))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    #[test]
    fn mock_returns_preset_fragments() {
        let r = MockRecognizer::new(vec![Fragment::new(BoundingBox::default(), "HELLO", 0.9)]);
        let out = r.recognize(Path::new("/nowhere.png")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "HELLO");
    }

    #[test]
    fn mock_ignores_path() {
        let r = MockRecognizer::new(vec![]);
        assert!(r.recognize(Path::new("a.png")).unwrap().is_empty());
        assert!(r.recognize(Path::new("")).unwrap().is_empty());
    }

    #[test]
    fn failing_recognizer_reports_engine_error() {
        let r = FailingRecognizer::new("model crashed");
        let err = r.recognize(Path::new("a.png")).unwrap_err();
        assert_eq!(err.to_string(), "OCR engine error: model crashed");
    }
}
