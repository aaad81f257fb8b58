//! HTTP client for the page OCR server.
//!
//! Page paths are usually known by their host location while the server runs
//! in a container with the library mounted elsewhere; [`PathMapping`]
//! rewrites the prefix before the request goes out.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Host → container path prefix rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapping {
    pub host_prefix: String,
    pub container_prefix: String,
}

impl PathMapping {
    pub fn new(host_prefix: impl Into<String>, container_prefix: impl Into<String>) -> Self {
        Self { host_prefix: host_prefix.into(), container_prefix: container_prefix.into() }
    }

    /// Replace the first occurrence of the host prefix.
    pub fn translate(&self, path: &str) -> String {
        if self.host_prefix.is_empty() {
            return path.to_string();
        }
        path.replacen(&self.host_prefix, &self.container_prefix, 1)
    }
}

#[derive(Serialize)]
struct OcrRequest<'a> {
    path: &'a str,
}

#[derive(Deserialize)]
struct OcrResponse {
    text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

#[derive(Debug, Clone)]
pub struct OcrClient {
    http: reqwest::Client,
    base_url: String,
    mapping: PathMapping,
}

impl OcrClient {
    pub fn new(base_url: impl Into<String>, mapping: PathMapping) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: reqwest::Client::new(), base_url, mapping }
    }

    /// Client for a server on this machine.
    pub fn local(port: u16, mapping: PathMapping) -> Self {
        Self::new(format!("http://127.0.0.1:{port}"), mapping)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the server for the text of the page at `path` (a host path).
    pub async fn extract_text(&self, path: &str) -> Result<String, ClientError> {
        let remote = self.mapping.translate(path);
        tracing::debug!(path, remote = %remote, "requesting OCR");

        let resp = self
            .http
            .post(format!("{}/ocr", self.base_url))
            .json(&OcrRequest { path: &remote })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if status == StatusCode::NOT_FOUND {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            return Err(ClientError::NotFound(detail));
        }
        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }

        let parsed: OcrResponse = serde_json::from_str(&body)?;
        Ok(parsed.text)
    }

    /// True when the server answers `/health` with `ok`.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(format!("{}/health", self.base_url)).send().await?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        let health: HealthResponse = resp.json().await?;
        Ok(health.status == "ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_swaps_host_prefix() {
        let m = PathMapping::new("/Users/me/Manga", "/manga");
        assert_eq!(m.translate("/Users/me/Manga/One/ch1/001.png"), "/manga/One/ch1/001.png");
    }

    #[test]
    fn translate_only_replaces_first_occurrence() {
        let m = PathMapping::new("/a", "/b");
        assert_eq!(m.translate("/a/x/a/y"), "/b/x/a/y");
    }

    #[test]
    fn translate_leaves_unrelated_paths() {
        let m = PathMapping::new("/Users/me/Manga", "/manga");
        assert_eq!(m.translate("/tmp/page.png"), "/tmp/page.png");
    }

    #[test]
    fn empty_mapping_is_identity() {
        let m = PathMapping::default();
        assert_eq!(m.translate("/x/y.png"), "/x/y.png");
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let c = OcrClient::new("http://ocr:5001/", PathMapping::default());
        assert_eq!(c.base_url(), "http://ocr:5001");
        assert_eq!(OcrClient::local(5001, PathMapping::default()).base_url(), "http://127.0.0.1:5001");
    }

    #[tokio::test]
    async fn unreachable_server_is_http_error() {
        let c = OcrClient::local(1, PathMapping::default());
        assert!(matches!(c.extract_text("/x.png").await, Err(ClientError::Http(_))));
    }
}
