//! Terminal control surface
//!
//! Stands in for the status-bar icon: a reader thread turns input lines into
//! `ControlEvent`s for the owner loop.
//!
//! | Input                       | Event                                 |
//! |-----------------------------|---------------------------------------|
//! | empty line, `t`, `toggle`   | primary activation                    |
//! | `m`, `menu`                 | secondary activation (context menu)   |
//! | `click`                     | pointer down outside the preview      |
//! | `size small\|average\|large`| menu: change preview size             |
//! | `icon`                      | menu: choose random icon              |
//! | `login`                     | menu: toggle launch at login          |
//! | `reset`                     | menu: reset permissions               |
//! | `about`                     | menu: about                           |
//! | `q`, `quit`                 | menu: quit                            |
//!
//! `click` is forwarded only while the dismissal monitor is armed, the same
//! way a global input monitor only delivers events while registered.

use std::fmt::Write as _;
use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use tracing::{debug, info, warn};
use webmirror::config::{MenuBarIcon, PreviewSize};

/// Entries of the context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Resize the preview to a preset
    SetSize(PreviewSize),
    /// Pick a new random tray icon
    ChooseRandomIcon,
    /// Flip the login item
    ToggleLaunchAtLogin,
    /// Open the camera privacy settings
    ResetPermissions,
    /// Show name and version
    About,
    /// Exit the application
    Quit,
}

/// Input delivered to the owner loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Primary activation of the control surface
    PrimaryActivation,
    /// Secondary activation: show the context menu
    SecondaryActivation,
    /// Pointer pressed outside the preview surface
    PointerDown,
    /// A context menu entry was chosen
    Menu(MenuAction),
}

/// Parse one input line
pub fn parse_command(line: &str) -> Option<ControlEvent> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Some(ControlEvent::PrimaryActivation);
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "t" | "toggle" => ControlEvent::PrimaryActivation,
        "m" | "menu" => ControlEvent::SecondaryActivation,
        "click" => ControlEvent::PointerDown,
        "size" => {
            let size = match words.next()?.to_ascii_lowercase().as_str() {
                "small" | "smol" => PreviewSize::SMALL,
                "average" | "medium" => PreviewSize::AVERAGE,
                "large" | "beeg" => PreviewSize::LARGE,
                _ => return None,
            };
            ControlEvent::Menu(MenuAction::SetSize(size))
        }
        "icon" => ControlEvent::Menu(MenuAction::ChooseRandomIcon),
        "login" => ControlEvent::Menu(MenuAction::ToggleLaunchAtLogin),
        "reset" => ControlEvent::Menu(MenuAction::ResetPermissions),
        "about" => ControlEvent::Menu(MenuAction::About),
        "q" | "quit" => ControlEvent::Menu(MenuAction::Quit),
        _ => return None,
    };
    Some(event)
}

/// Render the context menu with checkmarks for the current size and login state
pub fn render_menu(current_size: PreviewSize, launch_at_login: Option<bool>) -> String {
    let check = |on: bool| if on { "[x]" } else { "[ ]" };

    let mut menu = String::from("Change Preview Size\n");
    for (label, size) in PreviewSize::PRESETS {
        let _ = writeln!(
            menu,
            "  {} {label:<8} size {}",
            check(size == current_size),
            label.to_ascii_lowercase()
        );
    }
    menu.push_str("More\n");
    menu.push_str("      Choose Random Icon   icon\n");
    match launch_at_login {
        Some(enabled) => {
            let _ = writeln!(menu, "  {} Launch at Login      login", check(enabled));
        }
        None => menu.push_str("      Launch at Login      (unavailable)\n"),
    }
    menu.push_str("      Reset Permissions    reset\n");
    menu.push_str("      About                about\n");
    menu.push_str("Quit WebMirror               quit\n");
    menu
}

/// Terminal control surface
pub struct TrayIcon {
    /// Icon currently shown
    icon: MenuBarIcon,
    /// Set while a dismissal listener is registered
    dismissal_armed: Arc<AtomicBool>,
}

impl TrayIcon {
    /// Create the control surface showing `icon`
    pub fn new(icon: MenuBarIcon, dismissal_armed: Arc<AtomicBool>) -> Self {
        info!("Control surface created with icon {}", icon);
        Self {
            icon,
            dismissal_armed,
        }
    }

    /// Icon currently shown
    pub fn icon(&self) -> MenuBarIcon {
        self.icon
    }

    /// Swap the icon
    pub fn set_icon(&mut self, icon: MenuBarIcon) {
        info!("Control surface icon: {} -> {}", self.icon, icon);
        self.icon = icon;
        println!("Icon: {icon}");
    }

    /// Read stdin on a background thread, forwarding parsed events.
    /// End of input is reported as Quit.
    pub fn spawn_input_thread(
        &self,
        sender: mpsc::Sender<ControlEvent>,
    ) -> std::io::Result<std::thread::JoinHandle<()>> {
        let armed = Arc::clone(&self.dismissal_armed);
        std::thread::Builder::new()
            .name("control-input".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            warn!("Failed to read control input: {}", e);
                            break;
                        }
                    };
                    let Some(event) = parse_command(&line) else {
                        println!("Unknown command: {}", line.trim());
                        continue;
                    };
                    if event == ControlEvent::PointerDown && !armed.load(Ordering::SeqCst) {
                        debug!("Pointer event dropped, no dismissal listener");
                        continue;
                    }
                    if sender.send(event).is_err() {
                        return;
                    }
                }
                let _ = sender.send(ControlEvent::Menu(MenuAction::Quit));
            })
    }
}
