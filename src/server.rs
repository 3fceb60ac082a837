//! HTTP service wrapping the video decoder and signal pipeline.
//!
//! `POST /process_video` always answers `200 OK` with a heart rate record.
//! Any failure along the way is logged and reported as the fallback record.

use crate::{
    config::Config,
    pipeline::{degrade_to_fallback, HeartRateEstimate, PulsePipeline},
    video, Error, Result,
};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    response::Json,
    routing::{get, post},
    Router,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{io::Write, sync::Arc};
use tower_http::cors::CorsLayer;

/// Shared, read-only request state
#[derive(Debug, Clone)]
pub struct AppState {
    pipeline: PulsePipeline,
    upload_field: Arc<str>,
    max_upload_bytes: usize,
    max_frames: Option<usize>,
}

impl AppState {
    /// Build request state from validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pipeline: PulsePipeline::from_config(&config.pipeline)?,
            upload_field: Arc::from(config.server.upload_field.as_str()),
            max_upload_bytes: config.server.max_upload_bytes,
            max_frames: config.video.max_frames,
        })
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the service is up
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Create the application router
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/process_video", post(process_video))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl+C
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the socket cannot be
/// bound.
pub async fn serve(config: &Config) -> Result<()> {
    let address = config.bind_address()?;
    let app = router(AppState::from_config(config)?);

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Listening on http://{address}");
    info!("  GET  /health        - Health check");
    info!("  POST /process_video - Estimate heart rate from the '{}' upload", config.server.upload_field);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn process_video(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Json<HeartRateEstimate> {
    let result = match multipart {
        Ok(multipart) => analyze_upload(&state, multipart).await,
        Err(rejection) => Err(Error::UploadError(rejection.body_text())),
    };
    Json(degrade_to_fallback(result))
}

async fn analyze_upload(state: &AppState, mut multipart: Multipart) -> Result<HeartRateEstimate> {
    let data = read_upload(&mut multipart, &state.upload_field).await?;
    debug!("Received upload of {} bytes", data.len());

    let pipeline = state.pipeline;
    let max_frames = state.max_frames;

    // Decoding is CPU-bound; the temporary file lives only for this request.
    tokio::task::spawn_blocking(move || -> Result<HeartRateEstimate> {
        let mut upload = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".mp4")
            .tempfile()?;
        upload.write_all(&data)?;
        upload.flush()?;

        video::analyze_video(upload.path(), &pipeline, max_frames)
    })
    .await
    .map_err(|e| Error::Internal(format!("Processing task failed: {e}")))?
}

async fn read_upload(multipart: &mut Multipart, field_name: &str) -> Result<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::UploadError(e.body_text()))?
    {
        if field.name() == Some(field_name) {
            return field
                .bytes()
                .await
                .map_err(|e| Error::UploadError(format!("Failed to read upload: {}", e.body_text())));
        }
    }

    Err(Error::UploadError(format!("No '{field_name}' field in request")))
}
