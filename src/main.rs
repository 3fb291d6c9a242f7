//! `WebMirror` - Live camera preview from a tray control surface
//!
//! Press Enter to show or hide the preview, `menu` for the context menu.

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use gui::GuiController;
use std::sync::Arc;
use tracing::{error, info};
use webmirror::{
    camera::{CameraBackend, SystemCamera},
    config::ConfigManager,
    error::{WebMirrorError, get_user_friendly_error},
    utils,
};

/// Main entry point for the application
fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("WebMirror v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = ConfigManager::load().context("Failed to load application configuration")?;
    info!(
        "Configuration loaded: preview {}, icon {}",
        config.preview_size, config.icon
    );

    let backend: Arc<dyn CameraBackend> = Arc::new(SystemCamera::new());
    let gui_controller = match GuiController::new(config, backend) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Failed to initialize components: {:#}", e);
            let message = if let Some(webmirror_error) = e.downcast_ref::<WebMirrorError>() {
                get_user_friendly_error(webmirror_error)
            } else {
                format!("{e:#}")
            };
            show_error_and_exit(&message);
        }
    };

    println!("WebMirror ready. Enter: show/hide preview, `menu`: options, `quit`: exit.");

    info!("Starting GUI event loop");
    gui_controller
        .run()
        .context("GUI event loop terminated with error")?;

    info!("WebMirror shutting down");

    Ok(())
}

/// Shows an error message and exits the application.
fn show_error_and_exit(message: &str) -> ! {
    eprintln!("ERROR: {message}");
    std::process::exit(1);
}
