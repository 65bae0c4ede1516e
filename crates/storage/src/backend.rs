use crate::StorageError;
use picshare_models::{ImageMetadata, PhotoContent, PhotoUpload};
use std::path::PathBuf;

/// Where the bytes of a photo live
#[derive(Debug, Clone)]
pub enum PhotoSource {
    /// A file on disk, large ones can be streamed
    File {
        path: PathBuf,
        size: u64,
        content_type: String,
    },
    /// Already decoded into memory
    Memory(PhotoContent),
}

/// Gallery storage abstraction. Keys are the filenames handed out by `store`.
#[async_trait::async_trait]
pub trait PhotoStore: Send + Sync {
    /// Persist an upload under a freshly generated name, returns that name
    async fn store(&self, upload: PhotoUpload) -> Result<String, StorageError>;

    /// All images, newest first
    async fn list(&self) -> Result<Vec<ImageMetadata>, StorageError>;

    async fn open(&self, key: &str) -> Result<PhotoSource, StorageError>;

    /// Read a photo fully into memory
    async fn load(&self, key: &str) -> Result<PhotoContent, StorageError> {
        match self.open(key).await? {
            PhotoSource::Memory(content) => Ok(content),
            PhotoSource::File { path, content_type, .. } => {
                let data = tokio::fs::read(&path).await?;
                Ok(PhotoContent {
                    data: data.into(),
                    content_type,
                })
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every image, returns how many were removed
    async fn delete_all(&self) -> Result<usize, StorageError>;

    /// Short backend name for logs
    fn kind(&self) -> &'static str;

    /// Human readable location of the underlying storage
    fn location(&self) -> String;
}
