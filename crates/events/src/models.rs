use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { addr: String, backend: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { backend: String },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },

    // Storage
    StorageReady { kind: String, location: String },

    // Gallery activity
    PhotoUploaded { filename: String, size: usize },
    PhotoDeleted { filename: String },
    GalleryCleared { count: usize },
    AdminLogin { success: bool },

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
