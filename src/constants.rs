// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Film roll limits
pub mod exposures {
    /// Exposures on a fresh roll, also the ceiling restored by deletes
    pub const MAX_EXPOSURES: u32 = 24;
}

/// Cosmetic timing
pub mod timing {
    /// How long the white flash overlay stays up after the shutter (ms)
    pub const FLASH_DURATION_MS: u64 = 150;

    /// How long the shutter button reports the "capturing" state (ms)
    pub const CAPTURING_DURATION_MS: u64 = 300;
}

/// Still-image encoding
pub mod encoding {
    /// JPEG quality (0-100), 0.9 of max
    pub const JPEG_QUALITY: u8 = 90;

    /// MIME type of every encoded payload
    pub const MIME_TYPE: &str = "image/jpeg";
}

/// Acquisition constraints
pub mod acquisition {
    /// Ideal edge length of the square capture target (pixels)
    pub const IDEAL_RESOLUTION: u32 = 1080;
}

/// File naming
pub mod files {
    /// Prefix of every downloaded photo
    pub const PHOTO_PREFIX: &str = "retrocam";

    /// Extension of every downloaded photo
    pub const PHOTO_EXTENSION: &str = "jpg";

    /// Image file extensions accepted as still frame sources
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

    /// Check whether an extension names a supported image format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Subdirectory under the user's pictures folder
    pub const PHOTO_SUBDIR: &str = "retrocam";
}

/// Application info
pub mod app_info {
    /// Version string including the git commit
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}
