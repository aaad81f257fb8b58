use anyhow::Context;
use pageocr_engine::PageReader;
use pageocr_server::{build_backend, router, telemetry, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("config load failed")?;
    telemetry::init_tracing(config.log_format, &config.log_level);

    let backend = build_backend(&config).context("OCR engine init failed")?;
    let state = AppState { reader: PageReader::from_shared(backend) };

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, languages = ?config.languages, "OCR server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("OCR server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
    }
}
