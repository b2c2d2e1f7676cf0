// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic camera producing an asymmetric gradient
//!
//! The pattern differs between left and right halves so that mirrored and
//! unmirrored captures can be told apart pixel by pixel. Acquisition can be
//! made to fail on demand to exercise the session's error paths.

use super::ledger::{HandleLedger, SourceStats};
use super::types::{
    AcquireConstraints, BackendResult, CameraBackendType, CameraFrame, SourceHandle,
};
use super::CameraBackend;
use crate::errors::CameraError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::warn;

/// Generate the test pattern at `width` x `height`
///
/// Red ramps left to right, green ramps top to bottom, and a blue block marks
/// the top-left corner.
pub fn gradient_frame(width: u32, height: u32) -> CameraFrame {
    let w = width.max(1);
    let h = height.max(1);
    let mut data = Vec::with_capacity(w as usize * h as usize * 4);
    for y in 0..h {
        for x in 0..w {
            let r = (x * 255 / (w - 1).max(1)) as u8;
            let g = (y * 255 / (h - 1).max(1)) as u8;
            let b = if x < w.div_ceil(4) && y < h.div_ceil(4) { 255 } else { 32 };
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    CameraFrame {
        width: w,
        height: h,
        data: Arc::from(data.into_boxed_slice()),
        captured_at: Instant::now(),
    }
}

/// Backend generating [`gradient_frame`] at a fixed resolution
pub struct TestPatternBackend {
    width: u32,
    height: u32,
    failure: Mutex<Option<CameraError>>,
    frames: Mutex<HashMap<u64, Arc<CameraFrame>>>,
    ledger: HandleLedger,
}

impl TestPatternBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            failure: Mutex::new(None),
            frames: Mutex::new(HashMap::new()),
            ledger: HandleLedger::new(),
        }
    }

    /// Backend whose acquisitions fail with `error` until cleared
    pub fn failing(width: u32, height: u32, error: CameraError) -> Self {
        let backend = Self::new(width, height);
        backend.set_failure(Some(error));
        backend
    }

    /// Make subsequent acquisitions fail (`Some`) or succeed (`None`)
    pub fn set_failure(&self, error: Option<CameraError>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }
}

impl CameraBackend for TestPatternBackend {
    fn acquire(&self, constraints: &AcquireConstraints) -> BackendResult<SourceHandle> {
        if let Some(err) = self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            warn!(error = %err, facing = %constraints.facing, "Test pattern acquisition refused");
            return Err(err);
        }

        let handle = self.ledger.open(constraints.facing, self.width, self.height);
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle.id(), Arc::new(gradient_frame(self.width, self.height)));
        Ok(handle)
    }

    fn release(&self, handle: SourceHandle) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle.id());
        self.ledger.close(handle);
    }

    fn latest_frame(&self, handle: &SourceHandle) -> Option<Arc<CameraFrame>> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&handle.id())
            .cloned()
    }

    fn is_available(&self) -> bool {
        self.failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn backend_type(&self) -> CameraBackendType {
        CameraBackendType::TestPattern
    }

    fn stats(&self) -> SourceStats {
        self.ledger.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_horizontally_asymmetric() {
        let frame = gradient_frame(8, 8);
        assert_ne!(frame.pixel(0, 0), frame.pixel(7, 0));
        assert_eq!(frame.pixel(0, 0)[2], 255);
        assert_eq!(frame.pixel(7, 0)[2], 32);
        assert_eq!(frame.pixel(7, 0)[0], 255);
    }

    #[test]
    fn test_failure_can_be_cleared() {
        let backend = TestPatternBackend::failing(4, 4, CameraError::Busy);
        assert!(!backend.is_available());
        assert_eq!(
            backend.acquire(&AcquireConstraints::default()).unwrap_err(),
            CameraError::Busy
        );

        backend.set_failure(None);
        let handle = backend.acquire(&AcquireConstraints::default()).unwrap();
        assert!(backend.latest_frame(&handle).is_some());
        backend.release(handle);
        assert_eq!(backend.stats().live, 0);
    }
}
