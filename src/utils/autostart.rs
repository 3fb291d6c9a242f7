//! Launch at login
//!
//! Registers the executable to start with the user session:
//!
//! - Windows: `HKCU\Software\Microsoft\Windows\CurrentVersion\Run` value
//! - macOS: `~/Library/LaunchAgents/<label>.plist`
//! - Other Unix: XDG autostart entry `~/.config/autostart/webmirror.desktop`

use crate::error::{Result, StringError, WebMirrorError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the login item
const APP_NAME: &str = "WebMirror";

/// Launch agent label on macOS
#[cfg(target_os = "macos")]
const LAUNCH_AGENT_LABEL: &str = "app.webmirror.WebMirror";

/// Login item manager
pub struct AutoStartManager {
    /// Executable registered at login
    exe_path: PathBuf,
    /// Autostart entry file (unused on Windows)
    #[cfg_attr(windows, expect(dead_code, reason = "Windows uses the registry"))]
    entry_path: PathBuf,
}

impl AutoStartManager {
    /// Manager for the running executable and the platform entry location
    pub fn new() -> Result<Self> {
        let exe_path = std::env::current_exe()?;
        let entry_path = default_entry_path()?;
        Ok(Self {
            exe_path,
            entry_path,
        })
    }

    /// Manager writing its entry file to `entry_path`
    pub fn with_entry_path(exe_path: impl Into<PathBuf>, entry_path: impl Into<PathBuf>) -> Self {
        Self {
            exe_path: exe_path.into(),
            entry_path: entry_path.into(),
        }
    }

    /// Flip the login item and return the new state
    pub fn toggle(&self) -> Result<bool> {
        if self.is_enabled()? {
            self.disable()?;
            Ok(false)
        } else {
            self.enable()?;
            Ok(true)
        }
    }

    /// Check if launch at login is enabled
    #[cfg(not(windows))]
    pub fn is_enabled(&self) -> Result<bool> {
        Ok(self.entry_path.exists())
    }

    /// Enable launch at login
    #[cfg(not(windows))]
    pub fn enable(&self) -> Result<()> {
        if let Some(dir) = self.entry_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.entry_path, entry_contents(&self.exe_path))?;
        info!("Launch at login enabled ({})", self.entry_path.display());
        Ok(())
    }

    /// Disable launch at login
    #[cfg(not(windows))]
    pub fn disable(&self) -> Result<()> {
        match std::fs::remove_file(&self.entry_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        info!("Launch at login disabled");
        Ok(())
    }

    /// Check if launch at login is enabled
    #[cfg(windows)]
    pub fn is_enabled(&self) -> Result<bool> {
        Ok(run_key()?.get_value::<String, _>(APP_NAME).is_ok())
    }

    /// Enable launch at login
    #[cfg(windows)]
    pub fn enable(&self) -> Result<()> {
        let command = format!("\"{}\"", self.exe_path.display());
        run_key()?
            .set_value(APP_NAME, &command)
            .map_err(|e| WebMirrorError::AutoStartError(Box::new(e)))?;
        info!("Launch at login enabled");
        Ok(())
    }

    /// Disable launch at login
    #[cfg(windows)]
    pub fn disable(&self) -> Result<()> {
        match run_key()?.delete_value(APP_NAME) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(WebMirrorError::AutoStartError(Box::new(e))),
        }
        info!("Launch at login disabled");
        Ok(())
    }
}

#[cfg(windows)]
fn run_key() -> Result<winreg::RegKey> {
    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, KEY_READ, KEY_WRITE};

    RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey_with_flags(
            r"Software\Microsoft\Windows\CurrentVersion\Run",
            KEY_READ | KEY_WRITE,
        )
        .map_err(|e| WebMirrorError::AutoStartError(Box::new(e)))
}

#[cfg(target_os = "macos")]
fn default_entry_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WebMirrorError::AutoStartError(StringError::new("No home directory")))?;
    Ok(home
        .join("Library/LaunchAgents")
        .join(format!("{LAUNCH_AGENT_LABEL}.plist")))
}

#[cfg(not(target_os = "macos"))]
fn default_entry_path() -> Result<PathBuf> {
    let config = dirs::config_dir()
        .ok_or_else(|| WebMirrorError::AutoStartError(StringError::new("No config directory")))?;
    Ok(config.join("autostart").join("webmirror.desktop"))
}

/// Launch agent property list
#[cfg(target_os = "macos")]
fn entry_contents(exe_path: &Path) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{LAUNCH_AGENT_LABEL}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{}</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
</dict>
</plist>
"#,
        exe_path.display()
    )
}

/// XDG desktop entry
#[cfg(not(target_os = "macos"))]
fn entry_contents(exe_path: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={APP_NAME}\n\
         Exec=\"{}\"\n\
         X-GNOME-Autostart-enabled=true\n",
        exe_path.display()
    )
}
