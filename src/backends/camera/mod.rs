// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  AppModel / update  │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   CaptureSession    │  ← Acquire / release ordering, stale-result guard
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraBackend Trait │  ← Common interface
//! └──────────┬──────────┘
//!            │
//!      ┌─────┴───────┐
//!      ▼             ▼
//! ┌──────────┐ ┌─────────────┐
//! │StillImage│ │ TestPattern │
//! └──────────┘ └─────────────┘
//! ```

pub mod ledger;
pub mod still_image;
pub mod test_pattern;
pub mod types;

pub use ledger::{HandleLedger, SourceStats};
pub use still_image::StillImageBackend;
pub use test_pattern::TestPatternBackend;
pub use types::*;

use std::sync::Arc;

/// Frame source provider
///
/// Backends hand out exclusive [`SourceHandle`]s. A handle stays live until it
/// is passed back to [`CameraBackend::release`]; a backend must treat every
/// live handle as holding the device.
pub trait CameraBackend: Send + Sync {
    /// Request a live source matching `constraints`
    ///
    /// # Returns
    /// * `Ok(SourceHandle)` - Source acquired; frames available via `latest_frame`
    /// * `Err(CameraError)` - Permission denied, no device, or device busy
    fn acquire(&self, constraints: &AcquireConstraints) -> BackendResult<SourceHandle>;

    /// Stop all tracks of `handle` and free the device
    fn release(&self, handle: SourceHandle);

    /// Most recent frame of a live source, `None` if not ready or released
    fn latest_frame(&self, handle: &SourceHandle) -> Option<Arc<CameraFrame>>;

    /// Check if this backend can currently serve frames
    fn is_available(&self) -> bool;

    /// Get the backend type identifier
    fn backend_type(&self) -> CameraBackendType;

    /// Acquire/release bookkeeping
    fn stats(&self) -> SourceStats;
}
