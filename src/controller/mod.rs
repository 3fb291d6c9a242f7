//! Session lifecycle and presentation module
//!
//! This module coordinates the capture session with the visibility of the
//! preview surface.
//!
//! # Architecture
//!
//! - `SessionController`: Owns the capture session; `start()`/`stop()` are safe
//!   to call repeatedly and out of order
//! - `PresentationCoordinator`: Owns surface visibility and the single
//!   dismissal listener, and turns each visibility transition into exactly one
//!   lifecycle call
//! - **Owner context**: The thread calling into both components. It is the
//!   only thread that mutates their state
//! - **Camera worker**: Runs discovery and acquisition and hands the outcome
//!   back over a channel
//!
//! # Event Flow
//!
//! ```text
//! toggle() ──▶ PresentationCoordinator ──▶ SessionController::start()
//!                      ▲                           │
//!                      │                           ▼
//!                 pump() ◀── mpsc ◀── camera worker (discover + acquire)
//!                      │
//!                      ▼
//!               PreviewSurface::bind(session)
//! ```
//!
//! # Overlapping calls
//!
//! - `start()` while Starting or Running is ignored
//! - `stop()` while Starting returns to Idle at once and bumps the generation
//!   counter; the late outcome is discarded and its device released
//! - `stop()` while Idle does nothing

pub mod presentation;
pub mod session_controller;

pub use presentation::{
    DismissalMonitor, PresentationCoordinator, PreviewSurface, VisibilityState,
};
pub use session_controller::{SessionController, SessionLifecycle, SessionState, SessionUpdate};
