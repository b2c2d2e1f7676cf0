// SPDX-License-Identifier: MPL-2.0

//! Error types for the camera session

use thiserror::Error;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Camera acquisition errors
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),
    /// Photo encoding / saving errors
    #[error("Photo error: {0}")]
    Photo(#[from] PhotoError),
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
    /// Filter tag that is not part of the catalog
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),
}

/// Camera acquisition errors
///
/// Any of these leaves the session in a visible "no source" state; none of
/// them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    /// The platform or user refused camera access
    #[error("Camera permission denied")]
    PermissionDenied,
    /// No camera devices found
    #[error("No camera devices found")]
    NoCameraFound,
    /// Camera is busy or in use
    #[error("Camera is busy")]
    Busy,
    /// Camera initialization failed
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),
}

/// Photo encoding and save errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    /// Capture failed
    #[error("Capture failed: {0}")]
    CaptureFailed(String),
    /// Encoding failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
    /// Save failed
    #[error("Save failed: {0}")]
    SaveFailed(String),
    /// No photo with this id in the gallery
    #[error("Photo {0} not found")]
    NotFound(u64),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Photo(PhotoError::SaveFailed(err.to_string()))
    }
}

impl From<std::io::Error> for PhotoError {
    fn from(err: std::io::Error) -> Self {
        PhotoError::SaveFailed(err.to_string())
    }
}

impl From<image::ImageError> for PhotoError {
    fn from(err: image::ImageError) -> Self {
        PhotoError::EncodingFailed(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_error_wraps_into_app_error() {
        let err: AppError = CameraError::PermissionDenied.into();
        assert_eq!(err.to_string(), "Camera error: Camera permission denied");
    }

    #[test]
    fn test_io_error_becomes_save_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: PhotoError = io.into();
        assert!(matches!(err, PhotoError::SaveFailed(msg) if msg.contains("read-only")));
    }
}
