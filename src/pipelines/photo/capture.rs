// SPDX-License-Identifier: MPL-2.0

//! Snapshot engine
//!
//! Turns the current live frame into a [`Photo`]: a surface sized to the
//! frame's native resolution, the selected filter, a horizontal flip for the
//! front camera, then JPEG encoding. Capture is synchronous.

use super::canvas::Canvas;
use super::filters::FilterType;
use crate::backends::camera::types::{CameraFrame, FacingMode};
use crate::constants::encoding;
use crate::errors::PhotoError;
use crate::gallery::{Photo, PhotoIdGenerator};
use crate::session::Exposures;
use chrono::Utc;
use tracing::{debug, info};

/// Why a shutter press was ignored
///
/// These are guard conditions, not errors: the shutter control is expected
/// to be disabled whenever one of them holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureBlocked {
    /// The roll is used up
    NoExposures,
    /// No live source (never acquired, failed, or torn down)
    NoSource,
    /// Source acquired but no frame delivered yet
    NotReady,
    /// A capture is still in progress
    Busy,
}

impl std::fmt::Display for CaptureBlocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureBlocked::NoExposures => write!(f, "no exposures left"),
            CaptureBlocked::NoSource => write!(f, "no camera source"),
            CaptureBlocked::NotReady => write!(f, "camera not ready"),
            CaptureBlocked::Busy => write!(f, "capture in progress"),
        }
    }
}

/// Produces photos from live frames
pub struct SnapshotEngine {
    quality: u8,
    ids: PhotoIdGenerator,
}

impl SnapshotEngine {
    /// Engine encoding at `quality` (1-100)
    pub fn new(quality: u8) -> Self {
        Self {
            quality,
            ids: PhotoIdGenerator::new(),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Rasterize `frame` through `filter`, mirrored for the front camera
    pub fn render(
        frame: &CameraFrame,
        filter: FilterType,
        facing: FacingMode,
    ) -> Result<Canvas, PhotoError> {
        let mut canvas = Canvas::for_frame(frame);
        canvas.set_filter(filter);
        canvas.set_mirrored(facing.is_mirrored());
        canvas.draw_frame(frame)?;
        Ok(canvas)
    }

    /// Capture one photo, consuming one exposure
    ///
    /// # Returns
    /// * `Ok(Ok(Photo))` - Photo produced, `exposures` decremented by one
    /// * `Ok(Err(CaptureBlocked::NoExposures))` - No-op, nothing changed
    /// * `Err(PhotoError)` - Encoding failed, no exposure consumed
    pub fn capture(
        &self,
        frame: &CameraFrame,
        filter: FilterType,
        facing: FacingMode,
        exposures: &mut Exposures,
    ) -> Result<Result<Photo, CaptureBlocked>, PhotoError> {
        if exposures.remaining() == 0 {
            debug!("Capture ignored: no exposures left");
            return Ok(Err(CaptureBlocked::NoExposures));
        }

        let captured_at = Utc::now();
        let canvas = Self::render(frame, filter, facing)?;
        let encoded = canvas.encode_jpeg(self.quality)?;

        // Only a finished photo consumes film
        exposures.take();

        let photo = Photo::new(
            self.ids.next(captured_at),
            encoded.data,
            filter,
            facing,
            (encoded.width, encoded.height),
            captured_at,
        );

        info!(
            id = photo.id(),
            filter = %filter,
            facing = %facing,
            width = encoded.width,
            height = encoded.height,
            bytes = photo.payload().len(),
            remaining = exposures.remaining(),
            "Photo captured"
        );

        Ok(Ok(photo))
    }
}

impl Default for SnapshotEngine {
    fn default() -> Self {
        Self::new(encoding::JPEG_QUALITY)
    }
}
