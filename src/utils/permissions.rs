//! Camera permission reset
//!
//! There is no API to revoke a granted camera permission from inside the
//! application, so "Reset Permissions" sends the user to the platform's
//! camera privacy page.

use crate::error::Result;
use tracing::info;

/// Camera privacy settings page for the current platform
pub fn camera_privacy_settings_url() -> Option<&'static str> {
    if cfg!(target_os = "macos") {
        Some("x-apple.systempreferences:com.apple.preference.security?Privacy_Camera")
    } else if cfg!(windows) {
        Some("ms-settings:privacy-webcam")
    } else {
        None
    }
}

/// What happened when the user asked to reset camera permissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionReset {
    /// The settings page at this URL was opened
    OpenedSettings(&'static str),
    /// No settings page exists; show this hint instead
    Hint(&'static str),
}

/// Hint shown where camera access is governed by device node permissions
const DEVICE_ACCESS_HINT: &str = "Camera access is controlled by the permissions of /dev/video* \
     (usually the `video` group). Add your user to that group and log in again.";

/// Open the camera privacy settings, or return a hint when there are none
pub fn reset_camera_permissions() -> Result<PermissionReset> {
    let Some(url) = camera_privacy_settings_url() else {
        info!("No camera privacy settings page on this platform");
        return Ok(PermissionReset::Hint(DEVICE_ACCESS_HINT));
    };

    open::that(url)?;
    info!("Opened camera privacy settings: {}", url);
    Ok(PermissionReset::OpenedSettings(url))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn test_linux_returns_hint() {
        assert_eq!(camera_privacy_settings_url(), None);
        let reset = reset_camera_permissions().unwrap();
        assert!(matches!(reset, PermissionReset::Hint(hint) if hint.contains("video")));
    }

    #[test]
    #[cfg(target_os = "macos")]
    fn test_macos_privacy_url() {
        assert!(camera_privacy_settings_url().unwrap().contains("Privacy_Camera"));
    }
}
