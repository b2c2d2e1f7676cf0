// SPDX-License-Identifier: GPL-3.0-only

//! 2D raster surface used for snapshots
//!
//! Mirrors the drawing model of a browser canvas: configure the active filter
//! and mirror transform first, then draw the frame, then encode.

use super::encoding::{self, EncodedImage};
use super::filters::FilterType;
use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use image::RgbaImage;

/// Pixel buffer with an active filter and optional horizontal mirror
pub struct Canvas {
    image: RgbaImage,
    filter: FilterType,
    mirrored: bool,
}

impl Canvas {
    /// Blank surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            filter: FilterType::Normal,
            mirrored: false,
        }
    }

    /// Surface sized to the native resolution of `frame`
    pub fn for_frame(frame: &CameraFrame) -> Self {
        Self::new(frame.width, frame.height)
    }

    /// Filter applied by subsequent draws
    pub fn set_filter(&mut self, filter: FilterType) {
        self.filter = filter;
    }

    /// Flip subsequent draws around the vertical center line
    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Draw `frame` through the current transform, covering the surface
    pub fn draw_frame(&mut self, frame: &CameraFrame) -> Result<(), PhotoError> {
        if (frame.width, frame.height) != self.image.dimensions() {
            return Err(PhotoError::CaptureFailed(format!(
                "Frame {}x{} does not match surface {}x{}",
                frame.width,
                frame.height,
                self.image.width(),
                self.image.height()
            )));
        }

        let row_bytes = frame.width as usize * 4;
        let expected = row_bytes * frame.height as usize;
        if frame.data.len() != expected {
            return Err(PhotoError::CaptureFailed(format!(
                "Frame buffer holds {} bytes, expected {} for {}x{} RGBA",
                frame.data.len(),
                expected,
                frame.width,
                frame.height
            )));
        }

        let descriptor = self.filter.descriptor();
        let mirrored = self.mirrored;
        let dst: &mut [u8] = &mut self.image;

        for (src_row, dst_row) in frame
            .data
            .chunks_exact(row_bytes)
            .zip(dst.chunks_exact_mut(row_bytes))
        {
            if mirrored {
                for (src_px, dst_px) in src_row
                    .chunks_exact(4)
                    .rev()
                    .zip(dst_row.chunks_exact_mut(4))
                {
                    dst_px.copy_from_slice(src_px);
                }
            } else {
                dst_row.copy_from_slice(src_row);
            }
            descriptor.apply_rgba(dst_row);
        }

        Ok(())
    }

    /// Current pixels
    pub fn pixels(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode the surface as JPEG at `quality` (1-100)
    pub fn encode_jpeg(&self, quality: u8) -> Result<EncodedImage, PhotoError> {
        encoding::encode_jpeg(&self.image, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    fn two_pixel_frame() -> CameraFrame {
        CameraFrame::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap()
    }

    #[test]
    fn test_draw_copies_unmirrored() {
        let mut canvas = Canvas::for_frame(&two_pixel_frame());
        canvas.draw_frame(&two_pixel_frame()).unwrap();
        assert_eq!(canvas.pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(canvas.pixels().get_pixel(1, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_mirror_swaps_columns() {
        let mut canvas = Canvas::for_frame(&two_pixel_frame());
        canvas.set_mirrored(true);
        canvas.draw_frame(&two_pixel_frame()).unwrap();
        assert_eq!(canvas.pixels().get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(canvas.pixels().get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_filter_applies_to_drawn_pixels() {
        let mut canvas = Canvas::for_frame(&two_pixel_frame());
        canvas.set_filter(FilterType::Noir);
        canvas.draw_frame(&two_pixel_frame()).unwrap();
        let px = canvas.pixels().get_pixel(0, 0).0;
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let mut canvas = Canvas::new(4, 4);
        assert!(matches!(
            canvas.draw_frame(&two_pixel_frame()),
            Err(PhotoError::CaptureFailed(_))
        ));
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let frame = CameraFrame {
            width: 2,
            height: 2,
            data: Arc::from(vec![255u8; 2 * 4].into_boxed_slice()),
            captured_at: Instant::now(),
        };
        let mut canvas = Canvas::for_frame(&frame);
        assert!(matches!(
            canvas.draw_frame(&frame),
            Err(PhotoError::CaptureFailed(_))
        ));
    }
}
