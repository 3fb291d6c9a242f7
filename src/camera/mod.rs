//! Camera access module
//!
//! This module discovers physical cameras and wraps an opened device in a
//! [`CaptureSession`].
//!
//! # Architecture
//!
//! - `CameraBackend`: Platform seam for discovery and acquisition
//! - `DeviceDescriptor`: A discovered camera (identifier, display name)
//! - `DeviceInput`: The input stream handle of an opened camera
//! - `CaptureSession`: One live connection to a camera, shared read-only with
//!   the rendering surface through `Arc`
//! - `SystemCamera`: The backend used by the application (V4L2 on Linux)
//!
//! Discovery runs fresh on every session start; nothing is cached between
//! calls, so unplugging a camera between two previews is picked up.

pub mod device;
pub mod session;
pub mod system;

pub use device::{CameraBackend, DeviceDescriptor, DeviceInput, DeviceList};
pub use session::CaptureSession;
pub use system::SystemCamera;
