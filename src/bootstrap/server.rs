use picshare_events::{AppEvent, EventBus};
use picshare_config::{Config, StorageBackend};
use picshare_filesystem::FileSystem;
use picshare_storage::{BlobStore, DiskStore, PhotoStore};
use anyhow::Result;
use std::sync::Arc;

/// Prepares the directories the configured backend needs and builds it
pub async fn initialize_storage(config: &Config, events: &Arc<EventBus>) -> Result<Arc<dyn PhotoStore>> {
    let store: Arc<dyn PhotoStore> = match config.storage.backend {
        StorageBackend::Disk => {
            let root = FileSystem::ensure_photo_dir(&config.storage.photos_dir).await?;
            Arc::new(DiskStore::new(root, config.storage.url_prefix.as_str()).await?)
        }
        StorageBackend::Blob => {
            let path = FileSystem::ensure_parent_dir(&config.storage.blob_path).await?;
            Arc::new(BlobStore::new(path, config.storage.url_prefix.as_str()))
        }
    };

    tracing::info!("Initialized {} storage backend at {}", store.kind(), store.location());
    events.emit(AppEvent::StorageReady {
        kind: store.kind().to_string(),
        location: store.location(),
    });

    Ok(store)
}
