/// Default values for configuration fields

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    60
}

pub fn max_body_size() -> usize {
    25
}

pub fn max_concurrent_requests() -> usize {
    1000
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn streaming_threshold_mb() -> u64 {
    10  // Photos larger than 10MB are streamed instead of read into memory
}

pub fn enable_compression() -> bool {
    true
}

// Storage defaults
pub fn storage_backend() -> super::models::StorageBackend {
    super::models::StorageBackend::Disk
}

pub fn photos_dir() -> String {
    "photos".to_string()
}

pub fn blob_path() -> String {
    "imgshare_images.json".to_string()
}

pub fn url_prefix() -> String {
    "/api/photos".to_string()
}

pub fn storage_settings() -> super::models::StorageSettings {
    super::models::StorageSettings {
        backend: storage_backend(),
        photos_dir: photos_dir(),
        blob_path: blob_path(),
        url_prefix: url_prefix(),
    }
}

// Admin gate defaults
pub fn admin_password() -> String {
    "1234".to_string()
}

pub fn login_delay_ms() -> u64 {
    300
}

pub fn admin_settings() -> super::models::AdminSettings {
    super::models::AdminSettings {
        password: admin_password(),
        login_delay_ms: login_delay_ms(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# picshare Configuration
# ===============================================================================

[server]
# Network
host = "0.0.0.0"                     # Server bind address (0.0.0.0 = all interfaces)
port = 5100                          # Server port (the gallery frontend expects 5100)

# Performance
tcp_nodelay = true                   # Disable Nagle's algorithm (lower latency)
timeout_secs = 60                    # Request timeout in seconds
max_concurrent_requests = 1000       # Max simultaneous connections
max_body_size_mb = 25                # Max upload size in MB
streaming_threshold_mb = 10          # Photos >10MB are streamed from disk
enable_compression = true            # HTTP compression (gzip/brotli/deflate)

# CORS
allowed_origins = ["*"]              # "*" = all origins | ["https://example.com"] to restrict

# ===============================================================================
# STORAGE
# ===============================================================================
[storage]
backend = "disk"                     # "disk" (one file per photo) or "blob" (single JSON blob)
photos_dir = "photos"                # Photo directory for the disk backend
blob_path = "imgshare_images.json"   # Blob file for the blob backend
url_prefix = "/api/photos"           # Prefix of the photo URLs returned by /api/list

# ===============================================================================
# ADMIN
# ===============================================================================
[admin]
password = "1234"                    # Password checked by /api/admin/login (not real security)
login_delay_ms = 300                 # Delay before answering a login attempt
"#;
