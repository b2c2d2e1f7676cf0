// SPDX-License-Identifier: MPL-2.0

//! Photo capture pipeline
//!
//! ```text
//! Live frame → Canvas (native size) → Mirror + Filter → JPEG → Photo
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Surface**: Raster sized to the frame's reported width/height
//! 2. **Transform**: Horizontal flip for the front camera, then the filter
//! 3. **Encoding**: JPEG at fixed quality
//! 4. **Photo**: Id, payload, filter and timestamp bundled for the gallery
//!
//! The same [`FilterDescriptor`] drives the preview (via its CSS expression)
//! and the captured pixels.

pub mod canvas;
pub mod capture;
pub mod encoding;
pub mod filters;

pub use canvas::Canvas;
pub use capture::{CaptureBlocked, SnapshotEngine};
pub use encoding::EncodedImage;
pub use filters::{Adjustment, FilterDescriptor, FilterType};
