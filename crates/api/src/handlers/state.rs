use picshare_config::AdminSettings;
use picshare_events::EventBus;
use picshare_storage::PhotoStore;
use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(crate) store: Arc<dyn PhotoStore>,
    pub(crate) events: Arc<EventBus>,
    pub(crate) admin_password: Arc<str>,
    pub(crate) login_delay: Duration,
    pub(crate) streaming_threshold_bytes: u64,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PhotoStore>,
        events: Arc<EventBus>,
        admin: &AdminSettings,
        streaming_threshold_mb: u64,
    ) -> Self {
        Self {
            store,
            events,
            admin_password: Arc::from(admin.password.as_str()),
            login_delay: Duration::from_millis(admin.login_delay_ms),
            streaming_threshold_bytes: streaming_threshold_mb * 1024 * 1024,
        }
    }
}

impl FromRef<AppState> for Arc<dyn PhotoStore> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.store)
    }
}
