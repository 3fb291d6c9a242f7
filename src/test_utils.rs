#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `WebMirror` unit tests.
//!
//! This module provides common test infrastructure used across multiple test modules.
//! It is only compiled during testing (`#[cfg(test)]`).

use crate::camera::{CameraBackend, CaptureSession, DeviceDescriptor, DeviceInput, DeviceList};
use crate::config::PreviewSize;
use crate::config::manager::CONFIG_DIR_ENV;
use crate::controller::{DismissalMonitor, PreviewSurface, SessionLifecycle, SessionUpdate};
use crate::error::{Result, StringError, WebMirrorError};
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Global mutex to serialize tests that modify the config directory variable.
static CONFIG_DIR_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that points `WEBMIRROR_CONFIG_DIR` at a temp directory for a test
/// scope and restores the original value when dropped.
///
/// # Safety Considerations
///
/// `std::env::set_var` and `std::env::remove_var` are unsafe because other
/// threads may read the environment concurrently. The `CONFIG_DIR_LOCK` mutex
/// serializes every test that touches the variable, and the guard restores the
/// previous value on drop, including on panic.
pub struct ConfigDirGuard {
    original: Option<std::ffi::OsString>,
    // Held for the lifetime of the guard
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables under a global lock"
)]
impl ConfigDirGuard {
    /// Create a new guard that sets the config directory to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = CONFIG_DIR_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var_os(CONFIG_DIR_ENV);
        // SAFETY: serialized by CONFIG_DIR_LOCK, restored on drop
        unsafe {
            std::env::set_var(CONFIG_DIR_ENV, temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables under a global lock"
)]
impl Drop for ConfigDirGuard {
    fn drop(&mut self) {
        // SAFETY: the lock is still held; restores the state seen in `new`
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(CONFIG_DIR_ENV, original);
            }
        } else {
            unsafe {
                std::env::remove_var(CONFIG_DIR_ENV);
            }
        }
    }
}

/// Device input that counts releases
pub struct TrackedInput {
    released: Arc<AtomicUsize>,
    done: bool,
}

impl TrackedInput {
    /// Create an input reporting releases into `released`
    pub fn new(released: Arc<AtomicUsize>) -> Self {
        Self {
            released,
            done: false,
        }
    }
}

impl DeviceInput for TrackedInput {
    fn release(&mut self) {
        assert!(!self.done, "device input released twice");
        self.done = true;
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scriptable camera backend
///
/// Clones share devices, counters and the gate, so a test keeps one clone and
/// hands another to the controller.
#[derive(Clone)]
pub struct FakeBackend {
    devices: Arc<parking_lot::Mutex<DeviceList>>,
    fail_acquire: Arc<AtomicBool>,
    gate: Option<Receiver<()>>,
    gate_sender: Arc<parking_lot::Mutex<Option<Sender<()>>>>,
    /// Number of `discover` calls
    pub discoveries: Arc<AtomicUsize>,
    /// Number of successful `acquire` calls
    pub acquisitions: Arc<AtomicUsize>,
    /// Number of released inputs
    pub releases: Arc<AtomicUsize>,
}

impl FakeBackend {
    /// Backend exposing `count` cameras named "Camera N"
    pub fn with_devices(count: usize) -> Self {
        let devices = (0..count)
            .map(|i| DeviceDescriptor::new(format!("fake:{i}"), format!("Camera {i}")))
            .collect();
        Self {
            devices: Arc::new(parking_lot::Mutex::new(devices)),
            fail_acquire: Arc::new(AtomicBool::new(false)),
            gate: None,
            gate_sender: Arc::new(parking_lot::Mutex::new(None)),
            discoveries: Arc::new(AtomicUsize::new(0)),
            acquisitions: Arc::new(AtomicUsize::new(0)),
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make every acquisition fail
    pub fn failing(self) -> Self {
        self.fail_acquire.store(true, Ordering::SeqCst);
        self
    }

    /// Block discovery until `open_gate` is called
    pub fn gated(mut self) -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(0);
        self.gate = Some(receiver);
        *self.gate_sender.lock() = Some(sender);
        self
    }

    /// Let every pending and future discovery proceed
    pub fn open_gate(&self) {
        self.gate_sender.lock().take();
    }

    /// Replace the discovered devices
    pub fn set_devices(&self, devices: Vec<DeviceDescriptor>) {
        *self.devices.lock() = devices.into_iter().collect();
    }
}

impl CameraBackend for FakeBackend {
    fn discover(&self) -> Result<DeviceList> {
        if let Some(gate) = &self.gate {
            // Returns once the sender is dropped
            let _ = gate.recv();
        }
        self.discoveries.fetch_add(1, Ordering::SeqCst);
        Ok(self.devices.lock().clone())
    }

    fn acquire(&self, device: &DeviceDescriptor) -> Result<Box<dyn DeviceInput>> {
        if self.fail_acquire.load(Ordering::SeqCst) {
            return Err(WebMirrorError::DeviceAcquisitionFailed(StringError::new(
                format!("{} is busy", device.name),
            )));
        }
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TrackedInput::new(Arc::clone(&self.releases))))
    }
}

/// Lifecycle that only counts calls
#[derive(Default)]
pub struct CountingLifecycle {
    /// Number of `start` calls
    pub starts: usize,
    /// Number of `stop` calls
    pub stops: usize,
    /// Starts not yet matched by a stop
    pub running: usize,
    /// Highest value `running` reached
    pub max_running: usize,
    /// Updates returned by the next `process_pending`
    pub pending: Vec<SessionUpdate>,
}

impl SessionLifecycle for CountingLifecycle {
    fn start(&mut self) {
        self.starts += 1;
        self.running += 1;
        self.max_running = self.max_running.max(self.running);
    }

    fn stop(&mut self) -> Option<SessionUpdate> {
        self.stops += 1;
        if self.running == 0 {
            return None;
        }
        self.running -= 1;
        Some(SessionUpdate::Published(None))
    }

    fn process_pending(&mut self) -> Vec<SessionUpdate> {
        std::mem::take(&mut self.pending)
    }

    fn session(&self) -> Option<Arc<CaptureSession>> {
        None
    }
}

/// Surface recording the last show size and binding
#[derive(Default)]
pub struct FakeSurface {
    /// Size while shown, `None` while hidden
    pub shown_size: Option<PreviewSize>,
    /// Last binding; `None` until `bind` is first called
    pub bound: Option<Option<Arc<CaptureSession>>>,
}

impl FakeSurface {
    /// Session currently bound, if any
    pub fn bound_session(&self) -> Option<Arc<CaptureSession>> {
        self.bound.clone().flatten()
    }
}

impl PreviewSurface for FakeSurface {
    fn show(&mut self, size: PreviewSize) {
        self.shown_size = Some(size);
    }

    fn hide(&mut self) {
        self.shown_size = None;
    }

    fn bind(&mut self, session: Option<Arc<CaptureSession>>) {
        self.bound = Some(session);
    }
}

/// Counters kept by `FakeMonitor`
#[derive(Debug, Default)]
pub struct MonitorState {
    /// Listeners currently registered
    pub active: usize,
    /// Total registrations
    pub registrations: usize,
    /// Total unregistrations
    pub unregistrations: usize,
}

/// Dismissal monitor counting registrations; state survives the monitor
#[derive(Default)]
pub struct FakeMonitor {
    state: Arc<parking_lot::Mutex<MonitorState>>,
}

impl FakeMonitor {
    /// Listeners currently registered
    pub fn active(&self) -> usize {
        self.state.lock().active
    }

    /// Total unregistrations
    pub fn unregistrations(&self) -> usize {
        self.state.lock().unregistrations
    }

    /// Shared counters, readable after the monitor is dropped
    pub fn shared(&self) -> Arc<parking_lot::Mutex<MonitorState>> {
        Arc::clone(&self.state)
    }
}

impl DismissalMonitor for FakeMonitor {
    type Handle = usize;

    fn register(&mut self) -> usize {
        let mut state = self.state.lock();
        state.active += 1;
        state.registrations += 1;
        state.registrations
    }

    fn unregister(&mut self, _handle: usize) {
        let mut state = self.state.lock();
        state.active = state.active.checked_sub(1).unwrap();
        state.unregistrations += 1;
    }
}
