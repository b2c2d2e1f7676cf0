// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use retrocam::constants::{encoding, exposures, files, timing};

#[test]
fn test_roll_size() {
    assert_eq!(exposures::MAX_EXPOSURES, 24);
}

#[test]
fn test_flash_clears_before_capturing() {
    // The flash overlay must be gone by the time the shutter re-enables
    assert!(timing::FLASH_DURATION_MS < timing::CAPTURING_DURATION_MS);
}

#[test]
fn test_encoding_values() {
    assert!((1..=100).contains(&encoding::JPEG_QUALITY));
    assert_eq!(encoding::MIME_TYPE, "image/jpeg");
}

#[test]
fn test_image_extensions() {
    assert!(files::is_image_extension("jpg"));
    assert!(files::is_image_extension("PNG"));
    assert!(!files::is_image_extension("mp4"));
    assert!(!files::is_image_extension(""));
}

#[test]
fn test_version_is_set() {
    assert!(!retrocam::constants::app_info::version().is_empty());
}
