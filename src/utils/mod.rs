//! Utility modules
//!
//! Provides logging, launch-at-login registration and the camera permission
//! reset shortcut.

pub mod autostart;
pub mod logging;
pub mod permissions;

pub use autostart::AutoStartManager;
pub use logging::init_logging;
pub use permissions::{PermissionReset, reset_camera_permissions};
