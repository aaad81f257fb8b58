use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use pageocr_engine::PageReader;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Requests only carry a path, so bodies stay tiny.
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub reader: PageReader,
}

#[derive(Debug, Deserialize)]
pub struct OcrRequest {
    pub path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OcrResponse {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ocr", post(extract_text))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}

/// `POST /ocr` — recognize the page at `path` and return its confident text.
pub async fn extract_text(
    State(state): State<AppState>,
    Json(request): Json<OcrRequest>,
) -> Result<Json<OcrResponse>, ApiError> {
    let text = state.reader.read_page(&request.path).await?;
    Ok(Json(OcrResponse { text }))
}
