// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for camera capture
//!
//! # Architecture
//!
//! The backend layer abstracts the platform media capability, providing a
//! consistent API regardless of where frames come from:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │          App Layer / Capture Session         │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌─────────────┐    ┌──────────────────┐   │
//! │  │ Still image │    │   Test pattern   │   │
//! │  │   (file)    │    │   (generated)    │   │
//! │  └─────────────┘    └──────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Camera backend trait, source handles and frames

pub mod camera;
