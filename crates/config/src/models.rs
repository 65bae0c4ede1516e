use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerSettings,
    #[serde(default = "super::defaults::storage_settings")]
    pub storage: StorageSettings,
    #[serde(default = "super::defaults::admin_settings")]
    pub admin: AdminSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "super::defaults::tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::max_body_size")]
    pub max_body_size_mb: usize,
    #[serde(default = "super::defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "super::defaults::max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "super::defaults::streaming_threshold_mb")]
    pub streaming_threshold_mb: u64,
    #[serde(default = "super::defaults::enable_compression")]
    pub enable_compression: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One file per photo in `photos_dir`
    Disk,
    /// Whole gallery serialized into the single file at `blob_path`
    Blob,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Disk => "disk",
            StorageBackend::Blob => "blob",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "super::defaults::storage_backend")]
    pub backend: StorageBackend,
    #[serde(default = "super::defaults::photos_dir")]
    pub photos_dir: String,
    #[serde(default = "super::defaults::blob_path")]
    pub blob_path: String,
    #[serde(default = "super::defaults::url_prefix")]
    pub url_prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminSettings {
    #[serde(default = "super::defaults::admin_password")]
    pub password: String,
    #[serde(default = "super::defaults::login_delay_ms")]
    pub login_delay_ms: u64,
}
