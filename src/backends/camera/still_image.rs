// SPDX-License-Identifier: GPL-3.0-only

//! Still image served as a live camera source
//!
//! Used by the command line front end and by tests: the decoded image is
//! reported as the current frame of every handle this backend hands out.

use super::ledger::{HandleLedger, SourceStats};
use super::types::{
    AcquireConstraints, BackendResult, CameraBackendType, CameraFrame, FacingMode, SourceHandle,
};
use super::CameraBackend;
use crate::constants::files;
use crate::errors::CameraError;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Backend that streams one fixed frame
pub struct StillImageBackend {
    frame: Arc<CameraFrame>,
    /// Restrict to one camera; the other direction reports no device
    only_facing: Option<FacingMode>,
    ledger: HandleLedger,
}

impl StillImageBackend {
    /// Serve `frame` for both facing directions
    pub fn new(frame: CameraFrame) -> Self {
        Self {
            frame: Arc::new(frame),
            only_facing: None,
            ledger: HandleLedger::new(),
        }
    }

    /// Decode an image file and serve it as the live frame
    pub fn from_path(path: &Path) -> BackendResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if !files::is_image_extension(extension) {
            return Err(CameraError::InitializationFailed(format!(
                "Unsupported file format: {}",
                path.display()
            )));
        }

        info!(path = %path.display(), "Loading image file");

        let img = image::open(path).map_err(|e| {
            CameraError::InitializationFailed(format!(
                "Failed to load image '{}': {}",
                path.display(),
                e
            ))
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let frame = CameraFrame::from_rgba(width, height, rgba.into_raw()).ok_or_else(|| {
            CameraError::InitializationFailed(format!("Empty image '{}'", path.display()))
        })?;

        info!(width, height, "Image loaded successfully");
        Ok(Self::new(frame))
    }

    /// Only answer requests for `facing`
    pub fn with_only_facing(mut self, facing: FacingMode) -> Self {
        self.only_facing = Some(facing);
        self
    }
}

impl CameraBackend for StillImageBackend {
    fn acquire(&self, constraints: &AcquireConstraints) -> BackendResult<SourceHandle> {
        if let Some(only) = self.only_facing {
            if only != constraints.facing {
                return Err(CameraError::NoCameraFound);
            }
        }
        // Native resolution wins over the ideal target
        Ok(self
            .ledger
            .open(constraints.facing, self.frame.width, self.frame.height))
    }

    fn release(&self, handle: SourceHandle) {
        self.ledger.close(handle);
    }

    fn latest_frame(&self, handle: &SourceHandle) -> Option<Arc<CameraFrame>> {
        self.ledger
            .is_live(handle)
            .then(|| Arc::clone(&self.frame))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn backend_type(&self) -> CameraBackendType {
        CameraBackendType::StillImage
    }

    fn stats(&self) -> SourceStats {
        self.ledger.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CameraFrame {
        CameraFrame::from_rgba(3, 2, vec![200; 3 * 2 * 4]).unwrap()
    }

    #[test]
    fn test_reports_native_resolution() {
        let backend = StillImageBackend::new(frame());
        let handle = backend
            .acquire(&AcquireConstraints::square(FacingMode::Back, 1080))
            .unwrap();
        assert_eq!(handle.resolution(), (3, 2));
        assert!(backend.latest_frame(&handle).is_some());
    }

    #[test]
    fn test_released_handle_has_no_frames() {
        let backend = StillImageBackend::new(frame());
        let handle = backend.acquire(&AcquireConstraints::default()).unwrap();
        let stale = SourceHandle::new(handle.id(), handle.facing(), 3, 2);
        backend.release(handle);
        assert!(backend.latest_frame(&stale).is_none());
    }

    #[test]
    fn test_missing_direction_is_no_camera() {
        let backend = StillImageBackend::new(frame()).with_only_facing(FacingMode::Back);
        let err = backend
            .acquire(&AcquireConstraints::square(FacingMode::Front, 1080))
            .unwrap_err();
        assert_eq!(err, CameraError::NoCameraFound);
    }

    #[test]
    fn test_round_trips_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        image::RgbaImage::from_pixel(5, 4, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let backend = StillImageBackend::from_path(&path).unwrap();
        let handle = backend.acquire(&AcquireConstraints::default()).unwrap();
        let frame = backend.latest_frame(&handle).unwrap();
        assert_eq!((frame.width, frame.height), (5, 4));
        assert_eq!(frame.pixel(0, 0), [1, 2, 3, 255]);
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let err = StillImageBackend::from_path(Path::new("clip.mp4")).err();
        assert!(matches!(err, Some(CameraError::InitializationFailed(_))));
    }
}
