// SPDX-License-Identifier: GPL-3.0-only

//! Capture session manager
//!
//! Owns the live source handle, facing direction, selected filter and the
//! exposure counter. Acquisition is split in two halves so the caller can run
//! the (blocking) backend request off the event loop:
//!
//! ```text
//! begin_acquire ──▶ AcquireTicket ──▶ backend.acquire (blocking task)
//!                                            │
//! finish_acquire(ticket, result) ◀───────────┘
//! ```
//!
//! Every `begin_acquire` bumps the generation. A result carrying an older
//! generation is stale: its handle is released on arrival and never stored,
//! so rapid direction toggles cannot leave an orphaned source behind.

pub mod exposures;

pub use exposures::Exposures;

use crate::backends::camera::CameraBackend;
use crate::backends::camera::types::{
    AcquireConstraints, BackendResult, CameraFrame, FacingMode, SourceHandle,
};
use crate::config::Config;
use crate::errors::{CameraError, PhotoError};
use crate::gallery::Photo;
use crate::pipelines::photo::{CaptureBlocked, FilterType, SnapshotEngine};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A pending acquisition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquireTicket {
    pub generation: u64,
    pub constraints: AcquireConstraints,
}

/// What the viewfinder should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Waiting for the platform to grant or deny access
    Loading,
    /// Live source delivering frames
    Ready,
    /// Source acquired, no frame yet
    Starting,
    /// Last acquisition failed; stays here until the user retries
    Unavailable(CameraError),
    /// No source and no request in flight
    Idle,
}

/// Capture session state
pub struct CaptureSession {
    backend: Arc<dyn CameraBackend>,
    source: Option<SourceHandle>,
    facing: FacingMode,
    filter: FilterType,
    exposures: Exposures,
    loading: bool,
    generation: u64,
    last_error: Option<CameraError>,
    ideal_resolution: u32,
}

impl CaptureSession {
    /// New session with no source; call `acquire` or `begin_acquire` to start
    pub fn new(backend: Arc<dyn CameraBackend>, config: &Config) -> Self {
        info!(
            backend = %backend.backend_type(),
            facing = %config.default_facing,
            "Creating capture session"
        );
        Self {
            backend,
            source: None,
            facing: config.default_facing,
            filter: config.default_filter,
            exposures: Exposures::new(config.max_exposures),
            loading: false,
            generation: 0,
            last_error: None,
            ideal_resolution: config.ideal_resolution,
        }
    }

    // ===== Acquisition =====

    /// Start an acquisition for `facing`, superseding any request in flight
    pub fn begin_acquire(&mut self, facing: FacingMode) -> AcquireTicket {
        self.generation += 1;
        self.facing = facing;
        self.loading = true;

        let ticket = AcquireTicket {
            generation: self.generation,
            constraints: AcquireConstraints::square(facing, self.ideal_resolution),
        };
        info!(generation = ticket.generation, %facing, "Requesting camera source");
        ticket
    }

    /// Settle an acquisition started by `begin_acquire`
    ///
    /// A stale result (older generation) is released and ignored. Otherwise
    /// the previous source is released before the new one is stored; on
    /// failure the session is left without a source.
    pub fn finish_acquire(
        &mut self,
        ticket: AcquireTicket,
        result: BackendResult<SourceHandle>,
    ) -> Result<(), CameraError> {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "Discarding superseded acquisition result"
            );
            if let Ok(handle) = result {
                self.backend.release(handle);
            }
            return Ok(());
        }

        self.loading = false;
        self.teardown();

        match result {
            Ok(handle) => {
                let (width, height) = handle.resolution();
                info!(
                    id = handle.id(),
                    facing = %handle.facing(),
                    width,
                    height,
                    "Camera source ready"
                );
                self.last_error = None;
                self.source = Some(handle);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, facing = %self.facing, "Camera acquisition failed");
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Acquire a source for `facing`, running the backend call on a blocking task
    pub async fn acquire(&mut self, facing: FacingMode) -> Result<(), CameraError> {
        let ticket = self.begin_acquire(facing);
        let result = Self::run_acquire(Arc::clone(&self.backend), ticket).await;
        self.finish_acquire(ticket, result)
    }

    /// Perform the backend request for `ticket`
    pub async fn run_acquire(
        backend: Arc<dyn CameraBackend>,
        ticket: AcquireTicket,
    ) -> BackendResult<SourceHandle> {
        tokio::task::spawn_blocking(move || backend.acquire(&ticket.constraints))
            .await
            .unwrap_or_else(|e| {
                Err(CameraError::InitializationFailed(format!(
                    "Acquisition task error: {}",
                    e
                )))
            })
    }

    /// Release the current source and request the other camera
    pub fn begin_switch_direction(&mut self) -> AcquireTicket {
        self.teardown();
        let facing = self.facing.toggled();
        info!(%facing, "Switching camera direction");
        self.begin_acquire(facing)
    }

    /// Release the current source and acquire the other camera
    pub async fn switch_direction(&mut self) -> Result<(), CameraError> {
        let ticket = self.begin_switch_direction();
        let result = Self::run_acquire(Arc::clone(&self.backend), ticket).await;
        self.finish_acquire(ticket, result)
    }

    /// Release the current source, if any
    pub fn teardown(&mut self) {
        if let Some(handle) = self.source.take() {
            info!(id = handle.id(), "Releasing camera source");
            self.backend.release(handle);
        }
    }

    /// End the session: release the source and disown requests in flight
    pub fn close(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.teardown();
    }

    // ===== Filter =====

    /// Select the filter for the preview and the next capture
    pub fn select_filter(&mut self, filter: FilterType) {
        debug!(%filter, "Filter selected");
        self.filter = filter;
    }

    // ===== Capture =====

    /// Current frame, or the reason a capture would be ignored
    pub fn capture_guard(&self) -> Result<Arc<CameraFrame>, CaptureBlocked> {
        if self.exposures.is_empty() {
            return Err(CaptureBlocked::NoExposures);
        }
        let handle = self.source.as_ref().ok_or(CaptureBlocked::NoSource)?;
        self.backend
            .latest_frame(handle)
            .ok_or(CaptureBlocked::NotReady)
    }

    /// Capture one photo with the selected filter and facing direction
    ///
    /// # Returns
    /// * `Ok(Ok(Photo))` - Photo produced, one exposure consumed
    /// * `Ok(Err(CaptureBlocked))` - Guard tripped, nothing changed
    /// * `Err(PhotoError)` - Encoding failed, nothing consumed
    pub fn capture(
        &mut self,
        engine: &SnapshotEngine,
    ) -> Result<Result<Photo, CaptureBlocked>, PhotoError> {
        let frame = match self.capture_guard() {
            Ok(frame) => frame,
            Err(blocked) => {
                debug!(reason = %blocked, "Capture ignored");
                return Ok(Err(blocked));
            }
        };
        engine.capture(&frame, self.filter, self.facing, &mut self.exposures)
    }

    /// Return one exposure (after a delete), capped at the roll size
    pub fn restore_exposure(&mut self) -> u32 {
        if !self.exposures.restore() {
            debug!("Exposure counter already full");
        }
        self.exposures.remaining()
    }

    // ===== State =====

    pub fn status(&self) -> SessionStatus {
        if self.loading {
            return SessionStatus::Loading;
        }
        match (&self.source, &self.last_error) {
            (Some(handle), _) => {
                if self.backend.latest_frame(handle).is_some() {
                    SessionStatus::Ready
                } else {
                    SessionStatus::Starting
                }
            }
            (None, Some(err)) => SessionStatus::Unavailable(err.clone()),
            (None, None) => SessionStatus::Idle,
        }
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn exposures(&self) -> Exposures {
        self.exposures
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&SourceHandle> {
        self.source.as_ref()
    }

    pub fn last_error(&self) -> Option<&CameraError> {
        self.last_error.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn backend(&self) -> &Arc<dyn CameraBackend> {
        &self.backend
    }
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("backend", &self.backend.backend_type())
            .field("source", &self.source.as_ref().map(SourceHandle::id))
            .field("facing", &self.facing)
            .field("filter", &self.filter)
            .field("exposures", &self.exposures.remaining())
            .field("loading", &self.loading)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::TestPatternBackend;

    fn session(backend: Arc<TestPatternBackend>) -> CaptureSession {
        CaptureSession::new(backend, &Config::default())
    }

    #[test]
    fn test_begin_sets_loading_and_constraints() {
        let backend = Arc::new(TestPatternBackend::new(4, 4));
        let mut session = session(backend);
        let ticket = session.begin_acquire(FacingMode::Front);

        assert!(session.is_loading());
        assert_eq!(session.status(), SessionStatus::Loading);
        assert_eq!(ticket.constraints.facing, FacingMode::Front);
        assert_eq!(ticket.constraints.ideal_width, ticket.constraints.ideal_height);
    }

    #[test]
    fn test_stale_result_is_released_not_stored() {
        let backend = Arc::new(TestPatternBackend::new(4, 4));
        let mut session = session(Arc::clone(&backend));

        let first = session.begin_acquire(FacingMode::Back);
        let second = session.begin_acquire(FacingMode::Front);

        let newer = backend.acquire(&second.constraints);
        let older = backend.acquire(&first.constraints);

        session.finish_acquire(second, newer).unwrap();
        let kept = session.source().map(SourceHandle::id);
        session.finish_acquire(first, older).unwrap();

        assert_eq!(session.source().map(SourceHandle::id), kept);
        assert_eq!(session.facing(), FacingMode::Front);
        assert_eq!(backend.stats().live, 1);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_failure_leaves_no_source() {
        let backend = Arc::new(TestPatternBackend::failing(
            4,
            4,
            CameraError::PermissionDenied,
        ));
        let mut session = session(Arc::clone(&backend));
        let ticket = session.begin_acquire(FacingMode::Back);
        let result = backend.acquire(&ticket.constraints);

        let err = session.finish_acquire(ticket, result).unwrap_err();
        assert_eq!(err, CameraError::PermissionDenied);
        assert!(!session.has_source());
        assert_eq!(
            session.status(),
            SessionStatus::Unavailable(CameraError::PermissionDenied)
        );
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let backend = Arc::new(TestPatternBackend::new(4, 4));
        let mut session = session(Arc::clone(&backend));
        let ticket = session.begin_acquire(FacingMode::Back);
        let result = backend.acquire(&ticket.constraints);
        session.finish_acquire(ticket, result).unwrap();

        session.teardown();
        session.teardown();
        assert_eq!(backend.stats().released, 1);
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_close_disowns_pending_request() {
        let backend = Arc::new(TestPatternBackend::new(4, 4));
        let mut session = session(Arc::clone(&backend));
        let ticket = session.begin_acquire(FacingMode::Back);
        session.close();

        let late = backend.acquire(&ticket.constraints);
        session.finish_acquire(ticket, late).unwrap();
        assert!(!session.has_source());
        assert_eq!(backend.stats().live, 0);
    }

    #[test]
    fn test_capture_without_source_is_blocked() {
        let backend = Arc::new(TestPatternBackend::new(4, 4));
        let mut session = session(backend);
        let outcome = session.capture(&SnapshotEngine::default()).unwrap();
        assert_eq!(outcome.unwrap_err(), CaptureBlocked::NoSource);
        assert_eq!(session.exposures().remaining(), 24);
    }

    #[test]
    fn test_select_filter_applies_to_next_capture() {
        let backend = Arc::new(TestPatternBackend::new(4, 4));
        let mut session = session(Arc::clone(&backend));
        let ticket = session.begin_acquire(FacingMode::Back);
        let result = backend.acquire(&ticket.constraints);
        session.finish_acquire(ticket, result).unwrap();

        session.select_filter(FilterType::Fade);
        let photo = session
            .capture(&SnapshotEngine::default())
            .unwrap()
            .unwrap();
        assert_eq!(photo.filter(), FilterType::Fade);
    }
}
