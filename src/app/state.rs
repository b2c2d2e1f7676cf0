// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use super::timers::CosmeticTimer;
use crate::backends::camera::types::{BackendResult, FacingMode, SourceHandle};
use crate::config::Config;
use crate::errors::PhotoError;
use crate::gallery::{Gallery, PhotoId};
use crate::pipelines::photo::{FilterType, SnapshotEngine};
use crate::session::{AcquireTicket, CaptureSession, SessionStatus};
use crate::storage::PhotoSink;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Messages emitted by the UI and by background tasks.
///
/// Messages are organized into logical groups:
/// - **Camera Control**: Start, direction switch, acquisition results
/// - **Filters**: Filter selection
/// - **Capture Operations**: Shutter and the cosmetic timers it arms
/// - **Gallery**: Delete and download
/// - **System**: Shutdown
#[derive(Debug)]
pub enum Message {
    // ===== Camera Control =====
    /// Acquire the default camera
    Start,
    /// Toggle between front and back camera
    SwitchCamera,
    /// Acquisition settled (possibly stale)
    SourceAcquired {
        ticket: AcquireTicket,
        result: BackendResult<SourceHandle>,
    },

    // ===== Filters =====
    /// Select the filter for preview and capture
    SelectFilter(FilterType),

    // ===== Capture Operations =====
    /// Shutter pressed
    Capture,
    /// Flash overlay timer fired (token of the arming)
    ClearFlash(u64),
    /// Capturing-state timer fired (token of the arming)
    ClearCapturing(u64),

    // ===== Gallery =====
    /// Remove a photo and return its exposure
    DeletePhoto(PhotoId),
    /// Save a photo through the sink
    DownloadPhoto(PhotoId),
    /// Save finished
    PhotoSaved(Result<PathBuf, PhotoError>),

    // ===== System =====
    /// Release the camera and stop the event loop
    Shutdown,
}

/// The application model
///
/// All session state lives here and is only changed by [`AppModel::update`].
pub struct AppModel {
    /// Session configuration
    pub config: Config,
    /// Camera source, filter and exposures
    pub session: CaptureSession,
    /// Photos taken this session, newest first
    pub gallery: Gallery,
    /// Flash overlay visible
    pub flash_active: bool,
    /// Shutter reports "capturing"; further presses are ignored
    pub is_capturing: bool,
    /// Paths written by completed downloads
    pub saved: Vec<PathBuf>,
    /// Failures of completed downloads
    pub save_errors: Vec<PhotoError>,
    /// Downloads still running
    pub pending_saves: usize,
    pub(crate) engine: SnapshotEngine,
    pub(crate) sink: Arc<dyn PhotoSink>,
    pub(crate) flash_timer: CosmeticTimer,
    pub(crate) capturing_timer: CosmeticTimer,
    pub(crate) sender: UnboundedSender<Message>,
    pub(crate) running: bool,
}

/// Everything a view layer needs to draw one frame of UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub status: SessionStatus,
    pub facing: FacingMode,
    /// Preview is drawn flipped (front camera)
    pub mirrored_preview: bool,
    pub filter: FilterType,
    /// CSS `filter` value for the live preview element
    pub filter_css: String,
    pub exposures_remaining: u32,
    pub shutter_enabled: bool,
    pub flash_active: bool,
    pub is_capturing: bool,
    pub photo_count: usize,
}
