use tracing_subscriber::EnvFilter;

/// Console logging; `RUST_LOG` overrides the default filter
pub fn initialize() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,picshare=debug,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
