//! Capture session
//!
//! A `CaptureSession` is created on the camera worker with its input already
//! attached, then handed to the owner context which starts it and publishes
//! it. Observers receive it behind an `Arc` and only get read access.

use crate::camera::{DeviceDescriptor, DeviceInput};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// One live connection to a physical camera
pub struct CaptureSession {
    /// Unique identifier, used to correlate log lines
    id: Uuid,
    /// Device the session was built for
    device: DeviceDescriptor,
    /// Whether frames are flowing
    running: AtomicBool,
    /// Attached input, `None` once released
    input: Mutex<Option<Box<dyn DeviceInput>>>,
}

impl CaptureSession {
    /// Build a stopped session with `input` attached
    pub(crate) fn new(device: DeviceDescriptor, input: Box<dyn DeviceInput>) -> Self {
        Self {
            id: Uuid::new_v4(),
            device,
            running: AtomicBool::new(false),
            input: Mutex::new(Some(input)),
        }
    }

    /// Session identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Device this session reads from
    pub fn device(&self) -> &DeviceDescriptor {
        &self.device
    }

    /// Whether the session is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Whether the device input is still attached
    pub fn has_input(&self) -> bool {
        self.input.lock().is_some()
    }

    /// Whether the rendering surface may mirror this session's image
    pub fn supports_mirroring(&self) -> bool {
        self.device.supports_mirroring
    }

    /// Mark the session running. No-op once the input has been released.
    pub(crate) fn start_running(&self) {
        if self.has_input() {
            self.running.store(true, Ordering::SeqCst);
            tracing::debug!("Capture session {} running on {}", self.id, self.device.name);
        }
    }

    /// Halt the session and release the device input. Safe to call repeatedly.
    pub(crate) fn stop_running(&self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(mut input) = self.input.lock().take() {
            input.release();
            tracing::debug!(
                "Capture session {} released {}",
                self.id,
                self.device.id
            );
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop_running();
    }
}

impl fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSession")
            .field("id", &self.id)
            .field("device", &self.device)
            .field("running", &self.is_running())
            .field("has_input", &self.has_input())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::TrackedInput;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    fn session_with_counter() -> (CaptureSession, Arc<AtomicUsize>) {
        let released = Arc::new(AtomicUsize::new(0));
        let input = TrackedInput::new(Arc::clone(&released));
        let session = CaptureSession::new(
            DeviceDescriptor::new("/dev/video0", "Integrated Camera"),
            Box::new(input),
        );
        (session, released)
    }

    #[test]
    fn test_new_session_is_stopped_with_input() {
        let (session, released) = session_with_counter();
        assert!(!session.is_running());
        assert!(session.has_input());
        assert_eq!(released.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stop_releases_input_once() {
        let (session, released) = session_with_counter();
        session.start_running();
        assert!(session.is_running());

        session.stop_running();
        session.stop_running();

        assert!(!session.is_running());
        assert!(!session.has_input());
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_start_after_release_stays_stopped() {
        let (session, _released) = session_with_counter();
        session.stop_running();
        session.start_running();
        assert!(!session.is_running());
    }

    #[test]
    fn test_drop_releases_input() {
        let (session, released) = session_with_counter();
        drop(session);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_after_stop_does_not_release_twice() {
        let (session, released) = session_with_counter();
        session.stop_running();
        drop(session);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }
}
