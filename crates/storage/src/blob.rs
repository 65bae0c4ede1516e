use crate::backend::{PhotoSource, PhotoStore};
use crate::StorageError;
use picshare_models::{ImageMetadata, PhotoContent, PhotoUpload, StoredImage};
use picshare_utils::{
    content_type_for, decode_data_url, encode_data_url, extension_for_mime, extension_for_upload,
    format_file_size, generate_blob_filename, generate_image_id, now_millis, validate_filename,
};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// The whole gallery kept as one serialized array in a single file.
///
/// Every mutation reads the array, changes it and writes it back. The mutex
/// only keeps this process from interleaving those rewrites.
pub struct BlobStore {
    path: PathBuf,
    url_prefix: String,
    write_lock: Mutex<()>,
}

impl BlobStore {
    pub fn new(path: PathBuf, url_prefix: impl Into<String>) -> Self {
        Self {
            path,
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
            write_lock: Mutex::new(()),
        }
    }

    /// All stored images, newest first. A missing or unreadable blob reads as empty.
    pub async fn get_stored_images(&self) -> Vec<StoredImage> {
        match self.read_images().await {
            Ok(images) => images,
            Err(e) => {
                tracing::error!("Error retrieving images from {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    pub async fn save_image(&self, image: StoredImage) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        // A blob that cannot be read must not be overwritten
        let mut images = self.read_images().await?;
        images.insert(0, image);
        self.write_images(&images).await
    }

    /// Removes the record with `id`; returns whether one was removed
    pub async fn delete_image(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut images = self.read_images().await?;
        let before = images.len();
        images.retain(|img| img.id != id);

        if images.len() == before {
            return Ok(false);
        }

        self.write_images(&images).await?;
        Ok(true)
    }

    /// Drops the whole blob; returns how many records it held
    pub async fn clear_all_images(&self) -> Result<usize, StorageError> {
        let _guard = self.write_lock.lock().await;

        let count = self.get_stored_images().await.len();
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        Ok(count)
    }

    async fn read_images(&self) -> Result<Vec<StoredImage>, StorageError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let mut images: Vec<StoredImage> = serde_json::from_slice(&content)?;
        images.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(images)
    }

    async fn write_images(&self, images: &[StoredImage]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_vec(images)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    fn to_metadata(&self, image: StoredImage) -> ImageMetadata {
        ImageMetadata {
            url: format!("{}/{}", self.url_prefix, image.file_name),
            filename: image.file_name,
            uploaded_at: image.uploaded_at,
            file_size: image.file_size,
            original_filename: Some(image.original_file_name).filter(|name| !name.is_empty()),
        }
    }
}

#[async_trait::async_trait]
impl PhotoStore for BlobStore {
    async fn store(&self, upload: PhotoUpload) -> Result<String, StorageError> {
        let ext = extension_for_upload(upload.content_type.as_deref(), upload.original_name.as_deref());
        let file_name = generate_blob_filename(&ext);

        // Keep the declared type only when it is an image type we know
        let content_type = upload
            .content_type
            .as_deref()
            .filter(|ct| extension_for_mime(ct).is_some())
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for(&file_name));

        let image = StoredImage {
            id: generate_image_id(),
            data_url: encode_data_url(&content_type, &upload.data),
            original_file_name: upload.original_name.unwrap_or_else(|| file_name.clone()),
            file_name: file_name.clone(),
            uploaded_at: now_millis(),
            file_size: format_file_size(upload.data.len() as u64),
        };

        self.save_image(image).await?;
        tracing::debug!("BlobStore: saved {} to {}", file_name, self.path.display());

        Ok(file_name)
    }

    async fn list(&self) -> Result<Vec<ImageMetadata>, StorageError> {
        Ok(self
            .get_stored_images()
            .await
            .into_iter()
            .map(|image| self.to_metadata(image))
            .collect())
    }

    async fn open(&self, key: &str) -> Result<PhotoSource, StorageError> {
        validate_filename(key)?;

        let image = self
            .get_stored_images()
            .await
            .into_iter()
            .find(|img| img.file_name == key)
            .ok_or_else(|| StorageError::FileNotFound(key.to_string()))?;

        let (content_type, data) = decode_data_url(&image.data_url)
            .map_err(|e| StorageError::CorruptRecord(image.id.clone(), e.to_string()))?;

        Ok(PhotoSource::Memory(PhotoContent {
            data: data.into(),
            content_type,
        }))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_filename(key)?;

        let id = self
            .get_stored_images()
            .await
            .into_iter()
            .find(|img| img.file_name == key)
            .map(|img| img.id)
            .ok_or_else(|| StorageError::FileNotFound(key.to_string()))?;

        // A concurrent delete may have removed it in between
        if !self.delete_image(&id).await? {
            return Err(StorageError::FileNotFound(key.to_string()));
        }

        Ok(())
    }

    async fn delete_all(&self) -> Result<usize, StorageError> {
        self.clear_all_images().await
    }

    fn kind(&self) -> &'static str {
        "blob"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn blob_in(temp: &TempDir) -> BlobStore {
        BlobStore::new(temp.path().join("imgshare_images.json"), "/api/photos/")
    }

    fn record(id: &str, uploaded_at: i64) -> StoredImage {
        StoredImage {
            id: id.to_string(),
            data_url: encode_data_url("image/png", b"png"),
            file_name: format!("photo_{}_{}.png", uploaded_at, id),
            original_file_name: format!("{}.png", id),
            uploaded_at,
            file_size: format_file_size(3),
        }
    }

    #[tokio::test]
    async fn test_empty_blob_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let blob = blob_in(&temp);

        assert!(blob.get_stored_images().await.is_empty());
        assert!(blob.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_blob_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let blob = blob_in(&temp);
        std::fs::write(temp.path().join("imgshare_images.json"), b"{not json").unwrap();

        assert!(blob.get_stored_images().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_blob_is_never_overwritten() {
        let temp = TempDir::new().unwrap();
        let blob = blob_in(&temp);
        let path = temp.path().join("imgshare_images.json");
        std::fs::write(&path, b"{not json").unwrap();

        assert!(matches!(
            blob.store(PhotoUpload::new(b"x".to_vec())).await,
            Err(StorageError::SerializationError(_))
        ));
        assert!(blob.delete_image("anything").await.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"{not json");
    }

    #[tokio::test]
    async fn test_records_without_original_name_survive_new_uploads() {
        let temp = TempDir::new().unwrap();
        let blob = blob_in(&temp);
        let legacy = serde_json::json!([{
            "id": "1000_abcdefghi",
            "dataUrl": encode_data_url("image/png", b"old"),
            "fileName": "photo_1000_ABCDEFGHIJKLMNOP.png",
            "uploadedAt": 1000
        }]);
        std::fs::write(temp.path().join("imgshare_images.json"), legacy.to_string()).unwrap();

        assert_eq!(blob.list().await.unwrap().len(), 1);

        let name = blob.store(PhotoUpload::new(b"new".to_vec())).await.unwrap();

        let listed = blob.list().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec![name.as_str(), "photo_1000_ABCDEFGHIJKLMNOP.png"]);
        assert_eq!(listed[1].original_filename, None);
        assert_eq!(&blob.load("photo_1000_ABCDEFGHIJKLMNOP.png").await.unwrap().data[..], b"old");
    }

    #[tokio::test]
    async fn test_images_come_back_newest_first() {
        let temp = TempDir::new().unwrap();
        let blob = blob_in(&temp);

        blob.save_image(record("b", 2000)).await.unwrap();
        blob.save_image(record("a", 1000)).await.unwrap();
        blob.save_image(record("c", 3000)).await.unwrap();

        let ids: Vec<String> = blob.get_stored_images().await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_delete_image_by_id() {
        let temp = TempDir::new().unwrap();
        let blob = blob_in(&temp);
        blob.save_image(record("a", 1000)).await.unwrap();
        blob.save_image(record("b", 2000)).await.unwrap();

        assert!(blob.delete_image("a").await.unwrap());
        assert!(!blob.delete_image("a").await.unwrap());

        let remaining = blob.get_stored_images().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "b");
    }

    #[tokio::test]
    async fn test_clear_all_removes_blob() {
        let temp = TempDir::new().unwrap();
        let blob = blob_in(&temp);
        blob.save_image(record("a", 1000)).await.unwrap();
        blob.save_image(record("b", 2000)).await.unwrap();

        assert_eq!(blob.clear_all_images().await.unwrap(), 2);
        assert!(!temp.path().join("imgshare_images.json").exists());
        assert_eq!(blob.clear_all_images().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_photo_store_round_trip() {
        let temp = TempDir::new().unwrap();
        let blob = blob_in(&temp);

        let upload = PhotoUpload::new(b"GIF89a".to_vec())
            .with_content_type("image/gif")
            .with_original_name("party.gif");
        let name = blob.store(upload).await.unwrap();
        assert!(name.starts_with("photo_"));
        assert!(name.ends_with(".gif"));

        let listed = blob.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].filename, name);
        assert_eq!(listed[0].url, format!("/api/photos/{}", name));
        assert_eq!(listed[0].original_filename.as_deref(), Some("party.gif"));

        let content = blob.load(&name).await.unwrap();
        assert_eq!(content.content_type, "image/gif");
        assert_eq!(&content.data[..], b"GIF89a");

        blob.delete(&name).await.unwrap();
        assert!(matches!(blob.delete(&name).await, Err(StorageError::FileNotFound(_))));
        assert!(matches!(blob.open(&name).await, Err(StorageError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_saves_are_not_lost() {
        let temp = TempDir::new().unwrap();
        let blob = std::sync::Arc::new(blob_in(&temp));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let blob = blob.clone();
            handles.push(tokio::spawn(async move {
                blob.store(PhotoUpload::new(b"x".to_vec())).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(blob.list().await.unwrap().len(), 10);
    }
}
