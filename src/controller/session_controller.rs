//! Session lifecycle controller
//!
//! Owns the capture session and serializes its start/stop transitions.
//!
//! Device discovery and acquisition run on a dedicated worker pool. The
//! worker never touches controller state: it sends its outcome, tagged with
//! the generation of the `start()` call that spawned it, over a channel. The
//! owner context applies outcomes in `process_pending()`; an outcome whose
//! generation is no longer current is discarded and its session dropped, which
//! releases the device.

use crate::camera::{CameraBackend, CaptureSession};
use crate::error::{Result, WebMirrorError};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Number of camera worker threads. Acquisitions run one at a time so a
/// discarded attempt has closed its device before the next one opens it.
const CAMERA_WORKER_THREADS: usize = 1;

/// Lifecycle state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session and no acquisition in flight
    Idle,
    /// Acquisition in flight on the worker
    Starting,
    /// A session is running and published
    Running,
    /// The running session is being halted
    Stopping,
}

/// Change observers must react to
#[derive(Debug)]
pub enum SessionUpdate {
    /// The published session changed; `None` means "no session"
    Published(Option<Arc<CaptureSession>>),
    /// A start attempt ended without a session
    StartFailed(WebMirrorError),
}

/// Lifecycle operations the presentation layer drives
pub trait SessionLifecycle {
    /// Begin acquiring a session; the outcome arrives through `process_pending`
    fn start(&mut self);

    /// Halt the session, returning the resulting publication, if any
    fn stop(&mut self) -> Option<SessionUpdate>;

    /// Apply worker outcomes that arrived since the last call
    fn process_pending(&mut self) -> Vec<SessionUpdate>;

    /// Currently published session
    fn session(&self) -> Option<Arc<CaptureSession>>;
}

/// Result of one acquisition attempt, sent from the worker
struct AcquisitionOutcome {
    generation: u64,
    result: Result<CaptureSession>,
}

/// Session lifecycle controller
pub struct SessionController {
    /// Camera backend, shared with the worker
    backend: Arc<dyn CameraBackend>,
    /// Worker pool for discovery and acquisition
    pool: rayon::ThreadPool,
    /// Current lifecycle state
    state: SessionState,
    /// Generation of the latest `start()`; bumped again by `stop()` while Starting
    generation: u64,
    /// Published session
    session: Option<Arc<CaptureSession>>,
    /// Sender cloned into each worker task
    outcome_sender: mpsc::Sender<AcquisitionOutcome>,
    /// Outcomes waiting to be applied on the owner context
    outcome_receiver: mpsc::Receiver<AcquisitionOutcome>,
}

impl SessionController {
    /// Create an idle controller with its worker pool
    pub fn new(backend: Arc<dyn CameraBackend>) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(CAMERA_WORKER_THREADS)
            .thread_name(|index| format!("camera-worker-{index}"))
            .build()
            .map_err(|e| WebMirrorError::WorkerPool(Box::new(e)))?;
        let (outcome_sender, outcome_receiver) = mpsc::channel();

        Ok(Self {
            backend,
            pool,
            state: SessionState::Idle,
            generation: 0,
            session: None,
            outcome_sender,
            outcome_receiver,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Wait up to `timeout` for the next outcome that changes observable state.
    /// Stale outcomes are discarded while waiting.
    pub fn process_next(&mut self, timeout: Duration) -> Option<SessionUpdate> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let outcome = self.outcome_receiver.recv_timeout(remaining).ok()?;
            if let Some(update) = self.apply_outcome(outcome) {
                return Some(update);
            }
        }
    }

    /// Apply one worker outcome on the owner context
    fn apply_outcome(&mut self, outcome: AcquisitionOutcome) -> Option<SessionUpdate> {
        if outcome.generation != self.generation || self.state != SessionState::Starting {
            debug!(
                "Discarding stale acquisition outcome (generation {}, current {}, state {:?})",
                outcome.generation, self.generation, self.state
            );
            // Dropping a discarded session releases its device input
            return None;
        }

        match outcome.result {
            Ok(session) => {
                session.start_running();
                let session = Arc::new(session);
                info!(
                    "Camera session {} started on {}",
                    session.id(),
                    session.device().name
                );
                self.session = Some(Arc::clone(&session));
                self.state = SessionState::Running;
                Some(SessionUpdate::Published(Some(session)))
            }
            Err(e) => {
                warn!("Camera session failed to start: {}", e);
                self.state = SessionState::Idle;
                Some(SessionUpdate::StartFailed(e))
            }
        }
    }
}

impl SessionLifecycle for SessionController {
    fn start(&mut self) {
        match self.state {
            SessionState::Starting | SessionState::Running => {
                debug!("start() ignored in state {:?}", self.state);
                return;
            }
            SessionState::Idle | SessionState::Stopping => {}
        }

        self.generation += 1;
        self.state = SessionState::Starting;
        let generation = self.generation;
        debug!("Starting camera session (generation {})", generation);

        let backend = Arc::clone(&self.backend);
        let sender = self.outcome_sender.clone();
        self.pool.spawn(move || {
            let result = acquire_first_device(backend.as_ref());
            if sender.send(AcquisitionOutcome { generation, result }).is_err() {
                debug!("Session controller dropped before acquisition {} finished", generation);
            }
        });
    }

    fn stop(&mut self) -> Option<SessionUpdate> {
        match self.state {
            SessionState::Idle => {
                debug!("stop() with no session, nothing to do");
                None
            }
            SessionState::Starting => {
                // Invalidate the in-flight acquisition; its outcome will be discarded
                self.generation += 1;
                self.state = SessionState::Idle;
                info!("Camera session start cancelled");
                Some(SessionUpdate::Published(None))
            }
            SessionState::Running | SessionState::Stopping => {
                self.state = SessionState::Stopping;
                if let Some(session) = self.session.take() {
                    session.stop_running();
                    info!("Camera session {} stopped", session.id());
                }
                self.state = SessionState::Idle;
                Some(SessionUpdate::Published(None))
            }
        }
    }

    fn process_pending(&mut self) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();
        while let Ok(outcome) = self.outcome_receiver.try_recv() {
            if let Some(update) = self.apply_outcome(outcome) {
                updates.push(update);
            }
        }
        updates
    }

    fn session(&self) -> Option<Arc<CaptureSession>> {
        self.session.clone()
    }
}

/// Discover cameras and open the first one. Runs on the worker.
fn acquire_first_device(backend: &dyn CameraBackend) -> Result<CaptureSession> {
    let devices = backend.discover()?;
    info!(
        "Available cameras: {:?}",
        devices.iter().map(|d| d.name.as_str()).collect::<Vec<_>>()
    );

    let device = devices
        .into_iter()
        .next()
        .ok_or(WebMirrorError::NoDeviceAvailable)?;
    info!("Selected camera: {}", device.name);

    let input = backend.acquire(&device)?;
    Ok(CaptureSession::new(device, input))
}
