use super::models::{AppEvent, EventBus};
use std::sync::Arc;
use colored::Colorize;

impl EventBus {
    /// Silent mode keeps the console banners quiet; tracing output is unaffected.
    pub fn new(silent_mode: bool) -> Arc<Self> {
        Arc::new(Self { silent_mode })
    }

    pub fn is_silent(&self) -> bool {
        self.silent_mode
    }

    pub fn emit(&self, event: AppEvent) {
        match event {
            // Application lifecycle
            AppEvent::Starting => {
                if self.silent_mode {
                    return;
                }
                println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
                println!("  {}", "picshare - Photo Gallery Server".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
            }
            AppEvent::Ready { addr, backend } => {
                if self.silent_mode {
                    tracing::info!("Listening on {} ({} storage)", addr, backend);
                    return;
                }
                println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
                println!("  {} {}", "Server ".white(), addr.cyan());
                println!("  {} {}", "Storage".white(), backend.blue());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
            }
            AppEvent::Shutdown => {
                if !self.silent_mode {
                    println!("\n{}", "Server shutting down".red());
                }
                tracing::info!("Server stopped");
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                if !self.silent_mode {
                    println!("  {} {}", "Loading config".dimmed(), path.cyan());
                }
            }
            AppEvent::ConfigLoaded { backend } => {
                if !self.silent_mode {
                    println!("  {} {} backend", "✓".green(), backend.cyan());
                }
            }
            AppEvent::ConfigCreated { path } => {
                tracing::warn!("Configuration file not found");
                tracing::info!("Created default configuration at: {}", path);
            }
            AppEvent::ConfigMigrated { added_fields } => {
                if !added_fields.is_empty() && !self.silent_mode {
                    println!("  {} Config updated: added {}",
                        "↻".blue(),
                        added_fields.join(", ").dimmed()
                    );
                }
            }

            // Storage
            AppEvent::StorageReady { kind, location } => {
                if !self.silent_mode {
                    println!("  {} {} store at {}", "✓".green(), kind, location.cyan());
                }
            }

            // Gallery activity goes to the log only
            AppEvent::PhotoUploaded { filename, size } => {
                tracing::info!("Stored {} ({} bytes)", filename, size);
            }
            AppEvent::PhotoDeleted { filename } => {
                tracing::info!("Deleted {}", filename);
            }
            AppEvent::GalleryCleared { count } => {
                tracing::info!("Deleted {} file(s) from the gallery", count);
            }
            AppEvent::AdminLogin { success } => {
                if success {
                    tracing::info!("Admin login accepted");
                } else {
                    tracing::warn!("Admin login rejected");
                }
            }

            // Errors
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
        }
    }
}
