use super::models::FileSystem;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

impl FileSystem {
    /// Creates the photo directory if needed and returns its absolute path
    pub async fn ensure_photo_dir(photos_dir: &str) -> Result<PathBuf> {
        let abs_path = Self::get_absolute_path(Path::new(photos_dir))?;
        Self::create_directory(&abs_path, "Photo directory").await?;
        Ok(abs_path)
    }

    /// Creates the directory that will hold the blob file
    pub async fn ensure_parent_dir(file_path: &str) -> Result<PathBuf> {
        let abs_path = Self::get_absolute_path(Path::new(file_path))?;
        if let Some(parent) = abs_path.parent() {
            Self::create_directory(parent, "Blob directory").await?;
        }
        Ok(abs_path)
    }

    async fn create_directory(path: &Path, description: &str) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
            tracing::debug!("    Created: {} ({})", path.display(), description);
        } else {
            tracing::debug!("    Exists:  {} ({})", path.display(), description);
        }
        Ok(())
    }

    pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(abs_path)
    }

    pub fn get_absolute_path_string(path: &str) -> Result<String> {
        let path_buf = PathBuf::from(path);
        let abs = Self::get_absolute_path(&path_buf)?;
        Ok(abs.to_string_lossy().to_string())
    }
}
