// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for saving photos

use crate::constants::files;
use crate::errors::PhotoError;
use crate::gallery::Photo;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// File save trigger
///
/// Receives an encoded payload and its suggested filename and makes it
/// available to the user.
pub trait PhotoSink: Send + Sync {
    fn save(&self, payload: &[u8], filename: &str) -> Result<PathBuf, PhotoError>;
}

/// Saves photos into a directory, creating it on demand
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PhotoSink for DirectorySink {
    fn save(&self, payload: &[u8], filename: &str) -> Result<PathBuf, PhotoError> {
        // Suggested names never carry directories
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| PhotoError::SaveFailed(format!("Invalid filename '{}'", filename)))?;

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        std::fs::write(&path, payload)?;

        info!(path = %path.display(), bytes = payload.len(), "Photo saved");
        Ok(path)
    }
}

/// Default download directory (~/Pictures/retrocam, or ./retrocam)
pub fn default_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(files::PHOTO_SUBDIR)
}

/// Save a photo under its conventional filename without blocking the caller
pub async fn save_photo(sink: Arc<dyn PhotoSink>, photo: Photo) -> Result<PathBuf, PhotoError> {
    tokio::task::spawn_blocking(move || sink.save(photo.payload(), &photo.filename()))
        .await
        .map_err(|e| PhotoError::SaveFailed(format!("Save task error: {}", e)))?
}
