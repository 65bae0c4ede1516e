use crate::backend::{PhotoSource, PhotoStore};
use crate::StorageError;
use picshare_models::{ImageMetadata, PhotoUpload};
use picshare_utils::{
    content_type_for, extension_for_upload, format_file_size, generate_disk_filename,
    parse_timestamp_prefix, validate_filename,
};
use std::fs::Metadata;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// One file per photo inside a single directory
pub struct DiskStore {
    root: PathBuf,
    url_prefix: String,
}

impl DiskStore {
    pub async fn new(root: PathBuf, url_prefix: impl Into<String>) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;

        Ok(Self {
            root,
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a client supplied name onto a path that stays inside the root
    fn resolve(&self, filename: &str) -> Result<PathBuf, StorageError> {
        validate_filename(filename)?;

        let path = self.root.join(filename);
        if path.parent() != Some(self.root.as_path()) {
            return Err(StorageError::InvalidPath(filename.to_string()));
        }

        Ok(path)
    }

    fn metadata_for(&self, filename: String, meta: &Metadata) -> ImageMetadata {
        let uploaded_at = parse_timestamp_prefix(&filename).unwrap_or_else(|| file_time_millis(meta));

        ImageMetadata {
            url: format!("{}/{}", self.url_prefix, filename),
            filename,
            uploaded_at,
            file_size: format_file_size(meta.len()),
            original_filename: None,
        }
    }
}

/// Creation time when the platform reports one, modification time otherwise
fn file_time_millis(meta: &Metadata) -> i64 {
    meta.created()
        .or_else(|_| meta.modified())
        .map(|t| chrono::DateTime::<chrono::Utc>::from(t).timestamp_millis())
        .unwrap_or_default()
}

fn not_found_as(key: &str) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |e| {
        if e.kind() == ErrorKind::NotFound {
            StorageError::FileNotFound(key.to_string())
        } else {
            StorageError::IoError(e)
        }
    }
}

#[async_trait::async_trait]
impl PhotoStore for DiskStore {
    async fn store(&self, upload: PhotoUpload) -> Result<String, StorageError> {
        let ext = extension_for_upload(upload.content_type.as_deref(), upload.original_name.as_deref());
        let filename = generate_disk_filename(&ext);

        // The directory may have been removed while running
        fs::create_dir_all(&self.root).await?;
        fs::write(self.root.join(&filename), &upload.data).await?;

        tracing::debug!(
            "DiskStore: wrote {} ({} bytes) to {}",
            filename,
            upload.data.len(),
            self.root.display()
        );

        Ok(filename)
    }

    async fn list(&self) -> Result<Vec<ImageMetadata>, StorageError> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut images = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let meta = match entry.metadata().await {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::debug!("DiskStore: skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            if !meta.is_file() {
                continue;
            }

            let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
                tracing::debug!("DiskStore: skipping non UTF-8 name {:?}", entry.file_name());
                continue;
            };

            images.push(self.metadata_for(filename, &meta));
        }

        images.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });

        Ok(images)
    }

    async fn open(&self, key: &str) -> Result<PhotoSource, StorageError> {
        let path = self.resolve(key)?;
        let meta = fs::metadata(&path).await.map_err(not_found_as(key))?;

        if !meta.is_file() {
            return Err(StorageError::FileNotFound(key.to_string()));
        }

        Ok(PhotoSource::File {
            path,
            size: meta.len(),
            content_type: content_type_for(key),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;

        let meta = fs::metadata(&path).await.map_err(not_found_as(key))?;
        if !meta.is_file() {
            return Err(StorageError::FileNotFound(key.to_string()));
        }

        fs::remove_file(&path).await.map_err(not_found_as(key))?;

        tracing::debug!("DiskStore: removed {}", path.display());
        Ok(())
    }

    async fn delete_all(&self) -> Result<usize, StorageError> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut count = 0;
        while let Some(entry) = dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }

            match fs::remove_file(entry.path()).await {
                Ok(()) => count += 1,
                // Already gone, someone else won the race
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(count)
    }

    fn kind(&self) -> &'static str {
        "disk"
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store_in(temp: &TempDir) -> DiskStore {
        DiskStore::new(temp.path().join("photos"), "/api/photos").await.unwrap()
    }

    #[tokio::test]
    async fn test_store_writes_bytes_under_generated_name() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp).await;

        let upload = PhotoUpload::new(vec![0xFF, 0xD8, 0xFF]).with_content_type("image/jpeg");
        let filename = store.store(upload).await.unwrap();

        assert!(filename.ends_with(".jpg"));
        assert!(parse_timestamp_prefix(&filename).is_some());

        let written = std::fs::read(store.root().join(&filename)).unwrap();
        assert_eq!(written, vec![0xFF, 0xD8, 0xFF]);
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first_and_skips_directories() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp).await;
        let root = store.root().to_path_buf();

        std::fs::write(root.join("1000-aaaaaaaa.png"), vec![0u8; 2048]).unwrap();
        std::fs::write(root.join("3000-cccccccc.png"), b"c").unwrap();
        std::fs::write(root.join("2000-bbbbbbbb.gif"), b"b").unwrap();
        std::fs::create_dir(root.join("9999-nested")).unwrap();

        let images = store.list().await.unwrap();
        let names: Vec<&str> = images.iter().map(|i| i.filename.as_str()).collect();

        assert_eq!(names, vec!["3000-cccccccc.png", "2000-bbbbbbbb.gif", "1000-aaaaaaaa.png"]);
        assert_eq!(images[2].uploaded_at, 1000);
        assert_eq!(images[2].file_size, "2.00 KB");
        assert_eq!(images[0].url, "/api/photos/3000-cccccccc.png");
    }

    #[tokio::test]
    async fn test_list_falls_back_to_file_time() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp).await;

        std::fs::write(store.root().join("holiday.jpg"), b"x").unwrap();

        let images = store.list().await.unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].uploaded_at > 0);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp).await;
        std::fs::remove_dir_all(store.root()).unwrap();

        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.delete_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_open_and_load() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp).await;
        std::fs::write(store.root().join("1-abc.png"), b"png-bytes").unwrap();

        match store.open("1-abc.png").await.unwrap() {
            PhotoSource::File { size, content_type, .. } => {
                assert_eq!(size, 9);
                assert_eq!(content_type, "image/png");
            }
            other => panic!("unexpected source: {:?}", other),
        }

        let content = store.load("1-abc.png").await.unwrap();
        assert_eq!(&content.data[..], b"png-bytes");

        assert!(matches!(
            store.open("missing.png").await,
            Err(StorageError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_paths_outside_root() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp).await;
        std::fs::write(temp.path().join("secret.txt"), b"secret").unwrap();

        assert!(matches!(
            store.open("../secret.txt").await,
            Err(StorageError::InvalidPath(_))
        ));
        assert!(matches!(
            store.delete("../secret.txt").await,
            Err(StorageError::InvalidPath(_))
        ));
        assert!(temp.path().join("secret.txt").exists());
    }

    #[tokio::test]
    async fn test_delete_single_and_missing() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp).await;
        let name = store.store(PhotoUpload::new(b"a".to_vec())).await.unwrap();

        store.delete(&name).await.unwrap();
        assert!(!store.root().join(&name).exists());

        assert!(matches!(
            store.delete(&name).await,
            Err(StorageError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_directory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp).await;
        std::fs::create_dir(store.root().join("sub")).unwrap();

        assert!(matches!(
            store.delete("sub").await,
            Err(StorageError::FileNotFound(_))
        ));
        assert!(store.root().join("sub").is_dir());
    }

    #[tokio::test]
    async fn test_delete_all_counts_files_only() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp).await;

        for _ in 0..3 {
            store.store(PhotoUpload::new(b"img".to_vec())).await.unwrap();
        }
        std::fs::create_dir(store.root().join("keep")).unwrap();

        assert_eq!(store.delete_all().await.unwrap(), 3);
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.root().join("keep").is_dir());
    }
}
