//! Camera backend abstraction
//!
//! Backends are called from the camera worker thread only, never from the
//! thread that owns UI state.

use crate::error::Result;
use smallvec::SmallVec;

/// Discovered devices in platform enumeration order
pub type DeviceList = SmallVec<[DeviceDescriptor; 4]>;

/// A discovered physical camera
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceDescriptor {
    /// Stable platform identifier (e.g. `/dev/video0`)
    pub id: String,
    /// Human readable name shown in logs
    pub name: String,
    /// Whether the preview of this device can be mirrored horizontally
    pub supports_mirroring: bool,
}

impl DeviceDescriptor {
    /// Create a descriptor for a camera that supports mirroring
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            supports_mirroring: true,
        }
    }
}

/// Input stream handle of an opened camera
pub trait DeviceInput: Send {
    /// Stop frame delivery and free the device. Called at most once.
    fn release(&mut self);
}

/// Platform seam for camera discovery and acquisition
pub trait CameraBackend: Send + Sync {
    /// Enumerate cameras in stable platform order
    fn discover(&self) -> Result<DeviceList>;

    /// Open the input of a discovered camera
    ///
    /// Failures are reported as `WebMirrorError::DeviceAcquisitionFailed`.
    fn acquire(&self, device: &DeviceDescriptor) -> Result<Box<dyn DeviceInput>>;
}
