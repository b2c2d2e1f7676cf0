// SPDX-License-Identifier: GPL-3.0-only

//! Still-image encoding
//!
//! Every photo is stored as a baseline JPEG. Alpha is dropped before encoding
//! since JPEG has no alpha channel.

use crate::constants::encoding;
use crate::errors::PhotoError;
use image::{RgbImage, RgbaImage};
use tracing::debug;

/// Encoded image data ready for the gallery or a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    /// MIME type of the payload
    pub fn mime_type(&self) -> &'static str {
        encoding::MIME_TYPE
    }
}

/// Encode an RGBA raster as JPEG
///
/// # Arguments
/// * `image` - Filtered raster
/// * `quality` - JPEG quality (1-100)
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<EncodedImage, PhotoError> {
    let rgb = convert_rgba_to_rgb(image)?;

    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.clamp(1, 100));

    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PhotoError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

    debug!(size = buffer.len(), quality, "Encoding complete");

    Ok(EncodedImage {
        data: buffer,
        width: rgb.width(),
        height: rgb.height(),
    })
}

/// Convert RGBA data to RGB image (drop alpha channel)
fn convert_rgba_to_rgb(image: &RgbaImage) -> Result<RgbImage, PhotoError> {
    let (width, height) = image.dimensions();
    let rgb_data: Vec<u8> = image
        .as_raw()
        .chunks_exact(4)
        .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
        .collect();

    RgbImage::from_raw(width, height, rgb_data).ok_or_else(|| {
        PhotoError::EncodingFailed("Failed to create RGB image from converted data".to_string())
    })
}
