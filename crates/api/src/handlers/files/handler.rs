use super::disk::{self, CACHE_CONTROL_VALUE};
use crate::errors::ApiError;
use crate::handlers::state::AppState;
use picshare_storage::PhotoSource;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// `GET /api/photos/:filename`
pub async fn serve_photo(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    tracing::debug!("serve_photo: requested '{}'", filename);

    let source = state
        .store
        .open(&filename)
        .await
        .map_err(ApiError::storage("Failed to read file"))?;

    match source {
        PhotoSource::File { path, size, content_type } => {
            disk::serve_from_disk(path, size, content_type, state.streaming_threshold_bytes).await
        }
        PhotoSource::Memory(content) => Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content.content_type),
                (header::CACHE_CONTROL, CACHE_CONTROL_VALUE.to_string()),
            ],
            content.data,
        )
            .into_response()),
    }
}
