pub mod assemble;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod tsv;
pub mod types;

pub use assemble::assemble_text;
pub use pipeline::{PageReader, PipelineError};
pub use preprocess::{prepare_for_ocr, PreprocessError};
pub use recognizer::{FailingRecognizer, MockRecognizer, OcrBackend, OcrError};
pub use tsv::parse_tsv;
pub use types::{BoundingBox, Fragment, MIN_CONFIDENCE};

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
