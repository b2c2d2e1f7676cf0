// SPDX-License-Identifier: GPL-3.0-only

//! Application event loop for RetroCam
//!
//! This module contains the application state, message handling and the
//! background tasks that feed results back into the model.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, ViewState)
//! - `update`: Message dispatch
//! - `handlers`: Per-domain message handlers
//! - `timers`: Cancellable delayed messages (flash, capturing)
//!
//! Every state change goes through [`AppModel::update`]. Work that would
//! block (camera acquisition, saving) runs on the tokio runtime and posts a
//! [`Message`] back through the channel returned by [`AppModel::new`].

mod handlers;
mod state;
mod timers;
mod update;

pub use state::{AppModel, Message, ViewState};
pub use timers::CosmeticTimer;

use crate::backends::camera::CameraBackend;
use crate::config::Config;
use crate::gallery::Gallery;
use crate::pipelines::photo::SnapshotEngine;
use crate::session::{CaptureSession, SessionStatus};
use crate::storage::PhotoSink;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

impl AppModel {
    /// Build the model and the receiving end of its message channel
    pub fn new(
        config: Config,
        backend: Arc<dyn CameraBackend>,
        sink: Arc<dyn PhotoSink>,
    ) -> (Self, UnboundedReceiver<Message>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let session = CaptureSession::new(backend, &config);
        let engine = SnapshotEngine::new(config.jpeg_quality);

        let model = Self {
            config,
            session,
            gallery: Gallery::new(),
            flash_active: false,
            is_capturing: false,
            saved: Vec::new(),
            save_errors: Vec::new(),
            pending_saves: 0,
            engine,
            sink,
            flash_timer: CosmeticTimer::new(),
            capturing_timer: CosmeticTimer::new(),
            sender,
            running: true,
        };
        (model, receiver)
    }

    /// Handle for posting messages into the event loop
    pub fn sender(&self) -> UnboundedSender<Message> {
        self.sender.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Snapshot of what the UI should show
    pub fn view_state(&self) -> ViewState {
        let status = self.session.status();
        let filter = self.session.filter();
        let exposures = self.session.exposures();
        let shutter_enabled =
            status == SessionStatus::Ready && !exposures.is_empty() && !self.is_capturing;

        ViewState {
            facing: self.session.facing(),
            mirrored_preview: self.session.facing().is_mirrored(),
            filter,
            filter_css: filter.descriptor().css(),
            exposures_remaining: exposures.remaining(),
            shutter_enabled,
            flash_active: self.flash_active,
            is_capturing: self.is_capturing,
            photo_count: self.gallery.len(),
            status,
        }
    }

    /// Process queued messages until `done` holds, the model stops, or the
    /// channel closes
    pub async fn run_until(
        &mut self,
        receiver: &mut UnboundedReceiver<Message>,
        mut done: impl FnMut(&AppModel) -> bool,
    ) {
        while self.running && !done(self) {
            let Some(message) = receiver.recv().await else {
                break;
            };
            debug!(?message, "Processing message");
            self.update(message);
        }
    }

    /// Process messages until [`Message::Shutdown`]
    pub async fn run(mut self, mut receiver: UnboundedReceiver<Message>) {
        info!("Event loop started");
        self.run_until(&mut receiver, |_| false).await;
        self.release_pending(&mut receiver);
        info!(photos = self.gallery.len(), "Event loop stopped");
    }

    /// Close the channel and release sources from results still queued
    ///
    /// Call once the loop has stopped. Acquisitions finishing after this see
    /// a closed channel and release their handle themselves.
    pub fn release_pending(&mut self, receiver: &mut UnboundedReceiver<Message>) {
        receiver.close();
        while let Ok(message) = receiver.try_recv() {
            if let Message::SourceAcquired {
                result: Ok(handle), ..
            } = message
            {
                info!(id = handle.id(), "Releasing source queued behind shutdown");
                self.session.backend().release(handle);
            }
        }
    }
}
