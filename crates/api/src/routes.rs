use crate::handlers::{
    admin_login, delete_all_photos, delete_photo, list_photos, serve_photo, upload_photo, AppState,
};
use picshare_config::Config;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
};

/// The `/api` surface, without middleware or state.
///
/// Photos are served under `photo_prefix`, the same prefix the stores put in
/// the urls returned by `/api/list`.
pub fn api_routes(photo_prefix: &str) -> Router<AppState> {
    let photo_route = format!("{}/:filename", photo_prefix.trim_end_matches('/'));

    Router::new()
        .route("/api/upload", post(upload_photo))
        .route("/api/list", get(list_photos))
        .route(&photo_route, get(serve_photo))
        .route("/api/delete", delete(delete_photo))
        .route("/api/delete-all", delete(delete_all_photos))
        .route("/api/admin/login", post(admin_login))
}

/// Full application router: routes, limits, compression and CORS
pub fn build_router(config: &Config, app_state: AppState) -> Router {
    let max_body_size = config.server.max_body_size_mb * 1024 * 1024;
    let timeout = Duration::from_secs(config.server.timeout_secs);
    let max_concurrent_requests = config.server.max_concurrent_requests;

    let mut router = api_routes(&config.storage.url_prefix)
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
        // Multipart uploads are bounded by the layer below, not axum's 2MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout));

    if config.server.enable_compression {
        router = router.layer(CompressionLayer::new());
    }

    router
        .layer(build_cors_layer(&config.server.allowed_origins))
        .with_state(app_state)
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
