//! Presentation coordinator
//!
//! Owns the visibility of the preview surface and ties it to the session
//! lifecycle:
//!
//! | Transition     | Surface        | Dismissal listener | Session   |
//! |----------------|----------------|--------------------|-----------|
//! | Hidden → Shown | show, bind     | register           | `start()` |
//! | Shown → Hidden | hide           | unregister         | `stop()`  |
//!
//! The listener handle lives in an `Option` field that is filled on the show
//! path and emptied on the hide path, including when the coordinator is
//! dropped while shown.

use crate::camera::CaptureSession;
use crate::config::PreviewSize;
use crate::controller::{SessionLifecycle, SessionUpdate};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Visibility of the preview surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    /// Surface is not on screen
    Hidden,
    /// Surface is on screen
    Shown,
}

/// Platform preview-rendering surface
pub trait PreviewSurface {
    /// Put the surface on screen at `size`
    fn show(&mut self, size: PreviewSize);

    /// Take the surface off screen
    fn hide(&mut self);

    /// Render `session`, or a "no session" state when `None`.
    ///
    /// Implementations mirror the image horizontally when the session
    /// supports it.
    fn bind(&mut self, session: Option<Arc<CaptureSession>>);
}

/// Source of input events outside the preview surface
pub trait DismissalMonitor {
    /// Registration token returned by `register`
    type Handle;

    /// Start observing outside input
    fn register(&mut self) -> Self::Handle;

    /// Stop observing outside input
    fn unregister(&mut self, handle: Self::Handle);
}

/// Coordinates preview visibility with the capture session
pub struct PresentationCoordinator<L, S, M>
where
    L: SessionLifecycle,
    S: PreviewSurface,
    M: DismissalMonitor,
{
    /// Session lifecycle driven by visibility transitions
    lifecycle: L,
    /// Preview surface
    surface: S,
    /// Dismissal listener source
    monitor: M,
    /// Current visibility
    visibility: VisibilityState,
    /// Active dismissal listener; `Some` exactly while Shown
    listener: Option<M::Handle>,
    /// Size used the next time the surface is shown
    size: PreviewSize,
}

impl<L, S, M> PresentationCoordinator<L, S, M>
where
    L: SessionLifecycle,
    S: PreviewSurface,
    M: DismissalMonitor,
{
    /// Create a hidden coordinator
    pub fn new(lifecycle: L, surface: S, monitor: M, size: PreviewSize) -> Self {
        Self {
            lifecycle,
            surface,
            monitor,
            visibility: VisibilityState::Hidden,
            listener: None,
            size,
        }
    }

    /// Current visibility
    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    /// Whether the surface is on screen
    pub fn is_shown(&self) -> bool {
        self.visibility == VisibilityState::Shown
    }

    /// Whether a dismissal listener is registered
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Size of the preview surface
    pub fn size(&self) -> PreviewSize {
        self.size
    }

    /// Session lifecycle
    pub fn lifecycle(&self) -> &L {
        &self.lifecycle
    }

    /// Preview surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Dismissal monitor
    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    /// Show the surface when hidden, hide it when shown
    pub fn toggle(&mut self) {
        match self.visibility {
            VisibilityState::Hidden => self.open(),
            VisibilityState::Shown => self.close(),
        }
    }

    /// Hide in response to a dismissal signal. Returns whether the surface was shown.
    pub fn dismiss(&mut self) -> bool {
        if self.visibility == VisibilityState::Hidden {
            debug!("Dismissal ignored, preview already hidden");
            return false;
        }
        info!("Preview dismissed");
        self.close();
        true
    }

    /// Change the preview size. A shown surface is closed and reopened at the new size.
    pub fn set_size(&mut self, size: PreviewSize) {
        if self.size == size {
            return;
        }
        info!("Preview size changed: {} -> {}", self.size, size);
        self.size = size;

        if self.is_shown() {
            self.close();
            self.open();
        }
    }

    /// Apply session updates that arrived from the lifecycle
    pub fn pump(&mut self) {
        for update in self.lifecycle.process_pending() {
            self.apply(update);
        }
    }

    fn open(&mut self) {
        debug_assert!(self.listener.is_none(), "listener registered while hidden");
        info!("Showing preview ({})", self.size);

        self.surface.show(self.size);
        self.surface.bind(self.lifecycle.session());
        self.listener = Some(self.monitor.register());
        self.visibility = VisibilityState::Shown;
        self.lifecycle.start();
    }

    fn close(&mut self) {
        info!("Hiding preview");

        self.surface.hide();
        self.visibility = VisibilityState::Hidden;
        if let Some(update) = self.lifecycle.stop() {
            self.apply(update);
        }
        if let Some(handle) = self.listener.take() {
            self.monitor.unregister(handle);
        }
    }

    fn apply(&mut self, update: SessionUpdate) {
        match update {
            SessionUpdate::Published(session) => {
                if session.is_some() && !self.is_shown() {
                    warn!("Session published while preview hidden, not binding");
                    return;
                }
                self.surface.bind(session);
            }
            SessionUpdate::StartFailed(e) => {
                warn!("Preview has no camera session: {}", e);
                self.surface.bind(None);
            }
        }
    }
}

impl<L, S, M> Drop for PresentationCoordinator<L, S, M>
where
    L: SessionLifecycle,
    S: PreviewSurface,
    M: DismissalMonitor,
{
    fn drop(&mut self) {
        if self.is_shown() {
            self.close();
        }
    }
}
