use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Blob serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Corrupt image record '{0}': {1}")]
    CorruptRecord(String, String),
}

impl From<picshare_utils::UtilsError> for StorageError {
    fn from(err: picshare_utils::UtilsError) -> Self {
        match err {
            picshare_utils::UtilsError::InvalidPath(msg) => StorageError::InvalidPath(msg),
            picshare_utils::UtilsError::InvalidDataUrl(msg) => {
                StorageError::CorruptRecord("data url".to_string(), msg)
            }
        }
    }
}
