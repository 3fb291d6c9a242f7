//! Terminal preview surface and dismissal monitor

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};
use webmirror::camera::CaptureSession;
use webmirror::config::PreviewSize;
use webmirror::controller::{DismissalMonitor, PreviewSurface};

/// Preview surface that reports what it would render
#[derive(Default)]
pub struct ConsoleSurface {
    /// Size while on screen
    shown: Option<PreviewSize>,
    /// Session being rendered
    session: Option<Arc<CaptureSession>>,
}

impl ConsoleSurface {
    /// Create a hidden surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Status line for the current binding
    fn status(&self) -> String {
        match &self.session {
            Some(session) => {
                let orientation = if session.supports_mirroring() {
                    "mirrored"
                } else {
                    "not mirrored"
                };
                format!("Live: {} ({orientation})", session.device().name)
            }
            None => "No active camera session".to_string(),
        }
    }
}

/// Preset name with dimensions, or just the dimensions for a custom size
fn size_label(size: PreviewSize) -> String {
    match size.preset_label() {
        Some(label) => format!("{label}, {size}"),
        None => size.to_string(),
    }
}

impl PreviewSurface for ConsoleSurface {
    fn show(&mut self, size: PreviewSize) {
        self.shown = Some(size);
        println!("Preview opened ({})", size_label(size));
    }

    fn hide(&mut self) {
        if self.shown.take().is_some() {
            println!("Preview closed");
        }
    }

    fn bind(&mut self, session: Option<Arc<CaptureSession>>) {
        self.session = session;
        if self.shown.is_some() {
            let status = self.status();
            info!("Preview: {}", status);
            println!("{status}");
        } else {
            debug!("Binding updated while hidden: {}", self.status());
        }
    }
}

/// Registration token of a dismissal listener
#[derive(Debug)]
pub struct ListenerToken(u64);

/// Arms the shared flag the input thread checks before forwarding outside clicks
#[derive(Default)]
pub struct ConsoleDismissalMonitor {
    armed: Arc<AtomicBool>,
    next_token: u64,
}

impl ConsoleDismissalMonitor {
    /// Create a disarmed monitor
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag shared with the input thread
    pub fn armed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.armed)
    }
}

impl DismissalMonitor for ConsoleDismissalMonitor {
    type Handle = ListenerToken;

    fn register(&mut self) -> ListenerToken {
        self.next_token += 1;
        self.armed.store(true, Ordering::SeqCst);
        debug!("Dismissal listener {} registered", self.next_token);
        ListenerToken(self.next_token)
    }

    fn unregister(&mut self, handle: ListenerToken) {
        self.armed.store(false, Ordering::SeqCst);
        debug!("Dismissal listener {} removed", handle.0);
    }
}
