// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines for photo capture
//!
//! # Pipeline Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │    Photo     │
//! │   (RGBA)     │     │  - Mirror (front) │     │  (JPEG, in   │
//! │              │     │  - Filter         │     │   gallery)   │
//! │              │     │  - Encoding       │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`photo`]: Filter catalog, raster surface, JPEG encoding and snapshots

pub mod photo;
