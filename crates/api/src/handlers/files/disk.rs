use crate::errors::ApiError;
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use tokio_util::io::ReaderStream;

pub(super) const CACHE_CONTROL_VALUE: &str = "public, max-age=86400";

/// Serves a photo from disk, either by streaming or loading into memory.
/// The threshold is configurable via server.streaming_threshold_mb
pub async fn serve_from_disk(
    full_path: PathBuf,
    file_size: u64,
    content_type: String,
    streaming_threshold_bytes: u64,
) -> Result<Response, ApiError> {
    if file_size > streaming_threshold_bytes {
        stream_large_file(full_path, content_type, file_size).await
    } else {
        load_small_file(full_path, content_type).await
    }
}

/// Streams a large file
async fn stream_large_file(
    full_path: PathBuf,
    content_type: String,
    file_size: u64,
) -> Result<Response, ApiError> {
    tracing::debug!(
        "serve_photo: streaming large file ({:.2} MB)",
        file_size as f64 / 1024.0 / 1024.0
    );

    let file = tokio::fs::File::open(&full_path).await.map_err(|e| {
        tracing::error!(
            "serve_photo: Failed to open file '{}': {}",
            full_path.display(),
            e
        );
        ApiError::NotFound
    })?;

    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE.to_string()),
        ],
        body,
    )
        .into_response())
}

/// Loads a small file into memory
async fn load_small_file(full_path: PathBuf, content_type: String) -> Result<Response, ApiError> {
    let content = tokio::fs::read(&full_path).await.map_err(|e| {
        tracing::error!(
            "serve_photo: Failed to read file '{}': {}",
            full_path.display(),
            e
        );
        ApiError::NotFound
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE.to_string()),
        ],
        content,
    )
        .into_response())
}
