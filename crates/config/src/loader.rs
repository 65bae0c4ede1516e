use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::errors::ConfigError;
use super::migration::migrate_config_if_needed;
use super::models::Config;
use std::path::Path;
use std::sync::Arc;

impl Config {
    /// Loads configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_file_with_events(path, None).await
    }

    /// Loads configuration from a file with optional event bus for notifications
    pub async fn from_file_with_events<P: AsRef<Path>>(
        path: P,
        events: Option<&Arc<picshare_events::EventBus>>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        // Create default config if it doesn't exist
        if !path.exists() {
            create_default_config(path).await?;
        }

        // Migrate config if needed
        migrate_config_if_needed(path, events).await?;

        // Read and parse config
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_body_size_mb == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.max_body_size_mb must be greater than 0".to_string(),
            ));
        }

        if self.server.max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.max_concurrent_requests must be greater than 0".to_string(),
            ));
        }

        if self.storage.photos_dir.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "storage.photos_dir must not be empty".to_string(),
            ));
        }

        if self.storage.blob_path.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "storage.blob_path must not be empty".to_string(),
            ));
        }

        if !self.storage.url_prefix.starts_with('/') {
            return Err(ConfigError::InvalidConfig(format!(
                "storage.url_prefix must start with '/', got '{}'",
                self.storage.url_prefix
            )));
        }

        if self.storage.url_prefix.contains([':', '*', '{', '}']) {
            return Err(ConfigError::InvalidConfig(format!(
                "storage.url_prefix must be a plain path, got '{}'",
                self.storage.url_prefix
            )));
        }

        Ok(())
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageBackend;

    #[tokio::test]
    async fn test_missing_file_gets_default_template() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let config = Config::from_file(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(config.server.port, 5100);
        assert_eq!(config.storage.backend, StorageBackend::Disk);
        assert_eq!(config.storage.photos_dir, "photos");
        assert_eq!(config.admin.password, "1234");
        assert_eq!(config.admin.login_delay_ms, 300);
        assert_eq!(config.server.allowed_origins, vec!["*".to_string()]);
    }

    #[tokio::test]
    async fn test_partial_file_is_completed() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(
            &path,
            "[server]\nhost = \"127.0.0.1\"\nport = 9000\n\n[storage]\nbackend = \"blob\"\n",
        )
        .await
        .unwrap();

        let config = Config::from_file(&path).await.unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.backend, StorageBackend::Blob);
        assert_eq!(config.storage.blob_path, "imgshare_images.json");

        let rewritten = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(rewritten.contains("[admin]"));
        assert!(rewritten.contains("url_prefix"));
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(
            &path,
            "[server]\nhost = \"0.0.0.0\"\nport = 5100\n\n[storage]\nurl_prefix = \"photos\"\n",
        )
        .await
        .unwrap();

        let err = Config::from_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_url_prefix_with_route_syntax_is_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(
            &path,
            "[server]\nhost = \"0.0.0.0\"\nport = 5100\n\n[storage]\nurl_prefix = \"/photos/:id\"\n",
        )
        .await
        .unwrap();

        let err = Config::from_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_unknown_backend_fails_to_parse() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(
            &path,
            "[server]\nhost = \"0.0.0.0\"\nport = 5100\n\n[storage]\nbackend = \"s3\"\n",
        )
        .await
        .unwrap();

        let err = Config::from_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseError(_)));
    }
}
