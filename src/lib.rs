// SPDX-License-Identifier: MPL-2.0

//! RetroCam - A disposable-camera style capture session
//!
//! This library provides the core functionality for RetroCam: a single live
//! camera source, a fixed roll of exposures, vintage filters, and an
//! in-memory gallery of JPEG snapshots.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Event loop, messages and handlers
//! - [`backends`]: Camera backend abstraction
//! - [`session`]: Capture session manager (source lifecycle, exposures)
//! - [`pipelines`]: Filter and snapshot engine
//! - [`gallery`]: Captured photo roll
//! - [`config`]: User configuration handling
//! - [`storage`]: Saving photos to disk
//!
//! # Example
//!
//! ```ignore
//! let (mut model, mut rx) = AppModel::new(config, backend, sink);
//! model.update(Message::Start);
//! model.run_until(&mut rx, |m| !m.session.is_loading()).await;
//! model.update(Message::SelectFilter(FilterType::Noir));
//! model.update(Message::Capture);
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod gallery;
pub mod pipelines;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, Message, ViewState};
pub use backends::camera::types::FacingMode;
pub use config::Config;
pub use errors::{AppError, AppResult, CameraError, PhotoError};
pub use gallery::{Gallery, Photo, PhotoId};
pub use pipelines::photo::FilterType;
pub use session::{CaptureSession, Exposures, SessionStatus};
