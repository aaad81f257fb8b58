pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use pageocr_engine::{OcrBackend, OcrError};

pub use config::{ConfigError, LogFormat, ServerConfig};
pub use error::ApiError;
pub use routes::{router, AppState, HealthResponse, OcrRequest, OcrResponse};

/// Build the process-wide engine from config.
#[cfg(feature = "tesseract")]
pub fn build_backend(config: &ServerConfig) -> Result<Arc<dyn OcrBackend>, OcrError> {
    let data_path = config
        .tessdata_dir
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned());
    let recognizer = pageocr_engine::TesseractRecognizer::new(data_path, &config.languages)?;
    Ok(Arc::new(recognizer))
}

/// Build the process-wide engine from config.
#[cfg(not(feature = "tesseract"))]
pub fn build_backend(_config: &ServerConfig) -> Result<Arc<dyn OcrBackend>, OcrError> {
    Err(OcrError::NotAvailable)
}
