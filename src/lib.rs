//! `WebMirror` - Live camera preview from a tray control surface
//!
//! Shows a camera preview in a transient surface opened from an always-visible
//! control icon. `PresentationCoordinator` owns the surface's visibility and
//! drives `SessionController`, which acquires the camera on a background worker
//! and publishes the live session back on the owner thread.
//!
//! # Threading
//!
//! - Owner context: the thread that calls into the controller module; owns all
//!   UI-affecting state
//! - Camera worker: device discovery and acquisition only

// Module declarations
pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{Result, WebMirrorError};
