use axum::{
    http::StatusCode,
    response::{IntoResponse, Response, Json},
};
use picshare_storage::StorageError;
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFileUploaded,

    #[error("Filename is required")]
    FilenameRequired,

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("File not found")]
    NotFound,

    #[error("Invalid password")]
    InvalidPassword,

    /// An extractor refused the request body; keeps the status it chose
    #[error("Request rejected ({0}): {1}")]
    Rejected(StatusCode, String),

    /// Storage failure; `context` is the message shown to the client
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StorageError,
    },
}

impl ApiError {
    /// Maps a storage error, keeping not-found and bad paths distinguishable
    pub fn storage(context: &'static str) -> impl FnOnce(StorageError) -> ApiError {
        move |err| match err {
            StorageError::FileNotFound(_) => ApiError::NotFound,
            StorageError::InvalidPath(msg) => ApiError::InvalidPath(msg),
            source => ApiError::Storage { context, source },
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::NoFileUploaded => (
                StatusCode::BAD_REQUEST,
                "NO_FILE",
                "No file uploaded".to_string(),
            ),
            ApiError::FilenameRequired => (
                StatusCode::BAD_REQUEST,
                "FILENAME_REQUIRED",
                "Filename is required".to_string(),
            ),
            ApiError::InvalidPath(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_PATH",
                "Invalid file path".to_string(),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "File not found".to_string(),
            ),
            ApiError::InvalidPassword => (
                StatusCode::UNAUTHORIZED,
                "INVALID_PASSWORD",
                "Invalid password".to_string(),
            ),
            ApiError::Rejected(status, msg) => (
                *status,
                "REQUEST_REJECTED",
                msg.clone(),
            ),
            ApiError::Storage { context, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                context.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
