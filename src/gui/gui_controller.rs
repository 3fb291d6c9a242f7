//! Owner loop of the front-end
//!
//! `GuiController` is the owner context: it alone touches the coordinator,
//! the config and the control surface. Each iteration drains session updates
//! before the next control event is handled.

use crate::gui::surface::{ConsoleDismissalMonitor, ConsoleSurface};
use crate::gui::tray::{ControlEvent, MenuAction, TrayIcon, render_menu};
use anyhow::{Context, Result};
use std::ops::ControlFlow;
use std::sync::{Arc, mpsc};
use std::time::Duration;
use tracing::{info, warn};
use webmirror::camera::CameraBackend;
use webmirror::config::{AppConfig, ConfigManager, MenuBarIcon};
use webmirror::controller::{PresentationCoordinator, SessionController};
use webmirror::utils::{AutoStartManager, PermissionReset, reset_camera_permissions};

type Coordinator = PresentationCoordinator<SessionController, ConsoleSurface, ConsoleDismissalMonitor>;

/// Front-end controller
pub struct GuiController {
    /// Preview visibility and session lifecycle
    coordinator: Coordinator,
    /// Persisted preferences
    config: AppConfig,
    /// Control surface
    tray: TrayIcon,
    /// Login item, `None` when it cannot be located on this system
    autostart: Option<AutoStartManager>,
    /// Sender handed to the input thread
    control_sender: mpsc::Sender<ControlEvent>,
    /// Control events for the owner loop
    control_receiver: mpsc::Receiver<ControlEvent>,
}

impl GuiController {
    /// Build the coordinator and control surface from the loaded config
    pub fn new(config: AppConfig, backend: Arc<dyn CameraBackend>) -> Result<Self> {
        let session = SessionController::new(backend).context("Failed to create session controller")?;
        let monitor = ConsoleDismissalMonitor::new();
        let tray = TrayIcon::new(config.icon, monitor.armed_flag());
        let coordinator =
            PresentationCoordinator::new(session, ConsoleSurface::new(), monitor, config.preview_size);

        let autostart = match AutoStartManager::new() {
            Ok(manager) => Some(manager),
            Err(e) => {
                warn!("Launch at login unavailable: {}", e);
                None
            }
        };

        let (control_sender, control_receiver) = mpsc::channel();

        Ok(Self {
            coordinator,
            config,
            tray,
            autostart,
            control_sender,
            control_receiver,
        })
    }

    /// Run until Quit is chosen or the control surface goes away
    pub fn run(mut self) -> Result<()> {
        use std::sync::mpsc::RecvTimeoutError;

        let _input_handle = self
            .tray
            .spawn_input_thread(self.control_sender.clone())
            .context("Failed to start control input thread")?;
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);

        info!("Entering owner loop (icon {})", self.tray.icon());
        loop {
            self.coordinator.pump();

            match self.control_receiver.recv_timeout(poll_interval) {
                Ok(event) => {
                    if self.dispatch(event).is_break() {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("Control channel disconnected. Exiting owner loop.");
                    break;
                }
            }
        }
        info!("Owner loop exited");

        Ok(())
    }

    /// Apply session updates that arrived while waiting, then handle `event`
    fn dispatch(&mut self, event: ControlEvent) -> ControlFlow<()> {
        self.coordinator.pump();
        self.handle_event(event)
    }

    fn handle_event(&mut self, event: ControlEvent) -> ControlFlow<()> {
        match event {
            ControlEvent::PrimaryActivation => self.coordinator.toggle(),
            ControlEvent::SecondaryActivation => {
                let login = self
                    .autostart
                    .as_ref()
                    .and_then(|manager| manager.is_enabled().ok());
                print!("{}", render_menu(self.coordinator.size(), login));
            }
            ControlEvent::PointerDown => {
                self.coordinator.dismiss();
            }
            ControlEvent::Menu(action) => return self.handle_menu_action(action),
        }
        ControlFlow::Continue(())
    }

    fn handle_menu_action(&mut self, action: MenuAction) -> ControlFlow<()> {
        match action {
            MenuAction::SetSize(size) => {
                self.config.preview_size = size;
                self.save_config();
                self.coordinator.set_size(size);
            }
            MenuAction::ChooseRandomIcon => {
                let icon = MenuBarIcon::random();
                self.config.icon = icon;
                self.save_config();
                self.tray.set_icon(icon);
            }
            MenuAction::ToggleLaunchAtLogin => match &self.autostart {
                Some(manager) => match manager.toggle() {
                    Ok(enabled) => println!("Launch at Login: {}", if enabled { "on" } else { "off" }),
                    Err(e) => {
                        warn!("Failed to toggle launch at login: {}", e);
                        println!("{}", webmirror::error::get_user_friendly_error(&e));
                    }
                },
                None => println!("Launch at Login is not available on this system"),
            },
            MenuAction::ResetPermissions => {
                println!("Reset Camera Permissions\nHave you tried turning it off and on again? :3");
                match reset_camera_permissions() {
                    Ok(PermissionReset::OpenedSettings(url)) => println!("Opened {url}"),
                    Ok(PermissionReset::Hint(hint)) => println!("{hint}"),
                    Err(e) => warn!("Failed to open camera privacy settings: {}", e),
                }
            }
            MenuAction::About => {
                println!("WebMirror\nVersion {}", env!("CARGO_PKG_VERSION"));
            }
            MenuAction::Quit => {
                info!("Quit requested");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Persist the config; on failure keep running with the in-memory copy
    fn save_config(&self) {
        if let Err(e) = ConfigManager::save(&self.config) {
            warn!(
                "Failed to save configuration to disk: {}. Continuing with in-memory config.",
                e
            );
        }
    }
}
