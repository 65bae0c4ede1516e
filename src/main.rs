mod bootstrap;

use picshare_api::{build_router, AppState};
use picshare_events::{AppEvent, EventBus};
use crate::bootstrap::{config, logging, server};
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let silent = std::env::var("PICSHARE_QUIET").is_ok_and(|v| v == "1" || v == "true");
    let events = EventBus::new(silent);
    events.emit(AppEvent::Starting);

    let config_path = std::env::var("PICSHARE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::load(&config_path, &events).await?;

    let store = server::initialize_storage(&config, &events).await?;
    let backend = store.kind().to_string();

    let app_state = AppState::new(
        store,
        events.clone(),
        &config.admin,
        config.server.streaming_threshold_mb,
    );
    let app = build_router(&config, app_state);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = bind_server(&addr).await?;

    events.emit(AppEvent::Ready {
        addr: addr.to_string(),
        backend,
    });

    let signal_events = events.clone();
    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            signal_events.emit(AppEvent::Error {
                context: "Failed to install Ctrl+C handler".to_string(),
                error: e.to_string(),
            });
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received, initiating graceful shutdown...");
    };

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(config.server.tcp_nodelay)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    events.emit(AppEvent::Shutdown);
    Ok(())
}

async fn bind_server(addr: &str) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            let port = addr.rsplit(':').next().unwrap_or("unknown");
            tracing::error!("❌ Port {} is already in use", port);
            tracing::error!("Another application is using this port");
            tracing::error!("Solutions:");
            tracing::error!("1. Stop the other application");
            tracing::error!("2. Change the port in config.toml");
            #[cfg(target_os = "windows")]
            tracing::error!("3. Find process: netstat -ano | findstr :{}", port);
            #[cfg(not(target_os = "windows"))]
            tracing::error!("3. Find process: lsof -i :{}", port);
        } else {
            tracing::error!("❌ Failed to bind server on {}: {}", addr, e);
        }
        anyhow::anyhow!("Failed to bind server: {}", e)
    })
}
