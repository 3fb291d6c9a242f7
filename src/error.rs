//! Error types for `WebMirror`
//!
//! This module defines all error types used throughout the application,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains so the log shows
//! the platform cause behind a failed camera start.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `WebMirror`
#[derive(Debug, Error)]
pub enum WebMirrorError {
    /// Device discovery found no camera
    #[error("No camera available")]
    NoDeviceAvailable,

    /// The camera was found but could not be opened (permission denied, busy, hardware error)
    /// Preserves the underlying error source for full error chain transparency
    #[error("Failed to acquire camera: {0}")]
    DeviceAcquisitionFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The background worker pool could not be created
    #[error("Failed to create camera worker pool: {0}")]
    WorkerPool(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Login item registration error
    #[error("Launch at login error: {0}")]
    AutoStartError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `WebMirror` operations
pub type Result<T> = std::result::Result<T, WebMirrorError>;

/// Convert an error to a user-friendly message
///
/// Camera errors point the user at the "Reset Permissions" menu entry, since a
/// denied camera permission is the most common reason a preview stays black.
pub fn get_user_friendly_error(error: &WebMirrorError) -> String {
    match error {
        WebMirrorError::NoDeviceAvailable => "No camera was found.\n\n\
             Please check that:\n\
             - A camera is connected\n\
             - No privacy shutter or hardware switch disables it"
            .to_string(),
        WebMirrorError::DeviceAcquisitionFailed(e) => {
            format!(
                "The camera could not be opened:\n\n{e}\n\n\
                 Another application may be using it, or camera access was denied.\n\
                 Use More > Reset Permissions to review camera access."
            )
        }
        WebMirrorError::WorkerPool(_) => "Failed to start the camera worker.\n\n\
             Try restarting the application."
            .to_string(),
        WebMirrorError::ConfigError(_) => "Failed to load or save preferences.\n\n\
             Your preview size and icon may not persist."
            .to_string(),
        WebMirrorError::AutoStartError(e) => {
            format!("Could not change the Launch at Login setting:\n\n{e}")
        }
        WebMirrorError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        WebMirrorError::JsonError(e) => {
            format!(
                "Preferences file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = WebMirrorError::NoDeviceAvailable;
        assert_eq!(error.to_string(), "No camera available");
    }

    #[test]
    fn test_acquisition_error_keeps_source() {
        use std::error::Error as _;

        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = WebMirrorError::DeviceAcquisitionFailed(Box::new(io_error));
        assert_eq!(error.to_string(), "Failed to acquire camera: denied");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_user_friendly_messages() {
        let message = get_user_friendly_error(&WebMirrorError::NoDeviceAvailable);
        assert!(message.contains("No camera was found"));

        let error = WebMirrorError::DeviceAcquisitionFailed(StringError::new("device busy"));
        let message = get_user_friendly_error(&error);
        assert!(message.contains("device busy"));
        assert!(message.contains("Reset Permissions"));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: WebMirrorError = io_error.into();
        assert!(matches!(error, WebMirrorError::IoError(_)));
    }
}
