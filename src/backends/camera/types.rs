// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use crate::constants::acquisition;
use crate::errors::CameraError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, CameraError>;

/// Which physical camera supplies frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// User-facing (selfie) camera, previewed mirrored
    Front,
    /// Environment-facing camera
    #[default]
    Back,
}

impl FacingMode {
    /// The other camera
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::Front => FacingMode::Back,
            FacingMode::Back => FacingMode::Front,
        }
    }

    /// Whether preview and capture are mirrored horizontally
    pub fn is_mirrored(self) -> bool {
        self == FacingMode::Front
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacingMode::Front => write!(f, "front"),
            FacingMode::Back => write!(f, "back"),
        }
    }
}

impl std::str::FromStr for FacingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" | "user" | "selfie" => Ok(FacingMode::Front),
            "back" | "environment" | "rear" => Ok(FacingMode::Back),
            other => Err(format!("unknown facing mode '{}'", other)),
        }
    }
}

/// Constraints passed to a backend when requesting a live source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquireConstraints {
    pub facing: FacingMode,
    /// Preferred width; backends may deliver something else
    pub ideal_width: u32,
    /// Preferred height; backends may deliver something else
    pub ideal_height: u32,
}

impl AcquireConstraints {
    /// Square target of `edge` pixels for `facing`
    pub fn square(facing: FacingMode, edge: u32) -> Self {
        Self {
            facing,
            ideal_width: edge,
            ideal_height: edge,
        }
    }
}

impl Default for AcquireConstraints {
    fn default() -> Self {
        Self::square(FacingMode::default(), acquisition::IDEAL_RESOLUTION)
    }
}

/// Camera backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraBackendType {
    /// Decoded still image served as a live stream
    #[default]
    StillImage,
    /// Synthetic gradient pattern
    TestPattern,
}

impl std::fmt::Display for CameraBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraBackendType::StillImage => write!(f, "still-image"),
            CameraBackendType::TestPattern => write!(f, "test-pattern"),
        }
    }
}

/// A single RGBA frame as reported by the live source
///
/// Width and height are the source's native resolution; the snapshot
/// surface is sized from them.
#[derive(Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA pixels (`width * height * 4` bytes)
    pub data: Arc<[u8]>,
    /// Timestamp when frame was captured
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Wrap packed RGBA pixels; returns None when the buffer size does not match
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != (width as usize * height as usize * 4) {
            return None;
        }
        Some(Self {
            width,
            height,
            data: Arc::from(data.into_boxed_slice()),
            captured_at: Instant::now(),
        })
    }

    /// RGBA value of the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Exclusive handle to an acquired live source
///
/// Not `Clone`: releasing consumes the handle, so a source can only be
/// released once and never used afterwards.
#[derive(Debug)]
pub struct SourceHandle {
    id: u64,
    facing: FacingMode,
    width: u32,
    height: u32,
}

impl SourceHandle {
    /// Backends mint handles; `id` must be unique per backend
    pub fn new(id: u64, facing: FacingMode, width: u32, height: u32) -> Self {
        Self {
            id,
            facing,
            width,
            height,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    /// Native resolution reported at acquisition
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_toggle_round_trip() {
        assert_eq!(FacingMode::Back.toggled(), FacingMode::Front);
        assert_eq!(FacingMode::Front.toggled().toggled(), FacingMode::Front);
        assert!(FacingMode::Front.is_mirrored());
        assert!(!FacingMode::Back.is_mirrored());
    }

    #[test]
    fn test_facing_parses_platform_names() {
        assert_eq!("user".parse::<FacingMode>().unwrap(), FacingMode::Front);
        assert_eq!("environment".parse::<FacingMode>().unwrap(), FacingMode::Back);
        assert!("sideways".parse::<FacingMode>().is_err());
    }

    #[test]
    fn test_frame_rejects_wrong_buffer_size() {
        assert!(CameraFrame::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(CameraFrame::from_rgba(0, 2, vec![]).is_none());
        let frame = CameraFrame::from_rgba(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(frame.pixel(1, 0), [5, 6, 7, 8]);
    }

    #[test]
    fn test_default_constraints_are_square() {
        let c = AcquireConstraints::default();
        assert_eq!(c.ideal_width, c.ideal_height);
        assert_eq!(c.facing, FacingMode::Back);
    }
}
