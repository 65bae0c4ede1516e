use super::state::AppState;
use crate::errors::ApiError;
use crate::models::{DeleteAllResponse, DeleteRequest, DeleteResponse, ListResponse, UploadResponse};
use picshare_events::AppEvent;
use picshare_models::PhotoUpload;
use picshare_storage::PhotoStore;
use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    response::Json,
};
use std::sync::Arc;

/// `POST /api/upload`: multipart form with a `file` part
pub async fn upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        // A part without a filename is a plain text value, not a file
        let Some(original_name) = field.file_name().map(str::to_string) else {
            return Err(ApiError::NoFileUploaded);
        };
        let content_type = field.content_type().map(str::to_string);

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?;

        let mut photo = PhotoUpload::new(data).with_original_name(original_name);
        if let Some(content_type) = content_type {
            photo = photo.with_content_type(content_type);
        }
        upload = Some(photo);
        break;
    }

    let upload = upload.ok_or(ApiError::NoFileUploaded)?;
    let size = upload.data.len();

    let filename = state
        .store
        .store(upload)
        .await
        .map_err(ApiError::storage("Failed to store file"))?;

    state.events.emit(AppEvent::PhotoUploaded {
        filename: filename.clone(),
        size,
    });

    Ok(Json(UploadResponse {
        success: true,
        filename,
    }))
}

/// `GET /api/list`
pub async fn list_photos(
    State(store): State<Arc<dyn PhotoStore>>,
) -> Result<Json<ListResponse>, ApiError> {
    let images = store
        .list()
        .await
        .map_err(ApiError::storage("Failed to list images"))?;

    Ok(Json(ListResponse { images }))
}

/// `DELETE /api/delete` with a `{"filename": ...}` body
pub async fn delete_photo(
    State(state): State<AppState>,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?;

    let filename = request
        .filename
        .filter(|name| !name.is_empty())
        .ok_or(ApiError::FilenameRequired)?;

    state
        .store
        .delete(&filename)
        .await
        .map_err(ApiError::storage("Failed to delete file"))?;

    state.events.emit(AppEvent::PhotoDeleted { filename });

    Ok(Json(DeleteResponse {
        success: true,
        message: "File deleted successfully".to_string(),
    }))
}

/// `DELETE /api/delete-all`
pub async fn delete_all_photos(
    State(state): State<AppState>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let count = state
        .store
        .delete_all()
        .await
        .map_err(ApiError::storage("Failed to delete files"))?;

    state.events.emit(AppEvent::GalleryCleared { count });

    Ok(Json(DeleteAllResponse {
        success: true,
        message: format!("Deleted {} file(s) successfully", count),
        deleted_count: count,
    }))
}
