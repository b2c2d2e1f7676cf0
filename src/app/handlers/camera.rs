// SPDX-License-Identifier: GPL-3.0-only

//! Camera control handlers
//!
//! Handles the initial acquisition, direction switching and the arrival of
//! acquisition results.

use crate::app::state::{AppModel, Message};
use crate::backends::camera::types::{BackendResult, SourceHandle};
use crate::session::{AcquireTicket, CaptureSession};
use std::sync::Arc;
use tokio::sync::mpsc::error::SendError;
use tracing::{info, warn};

impl AppModel {
    // =========================================================================
    // Camera Control Handlers
    // =========================================================================

    pub(crate) fn handle_start(&mut self) {
        if self.session.has_source() || self.session.is_loading() {
            info!("Camera already started");
            return;
        }
        let ticket = self.session.begin_acquire(self.session.facing());
        self.spawn_acquire(ticket);
    }

    pub(crate) fn handle_switch_camera(&mut self) {
        info!(current = %self.session.facing(), "Received SwitchCamera message");
        let ticket = self.session.begin_switch_direction();
        self.spawn_acquire(ticket);
    }

    pub(crate) fn handle_source_acquired(
        &mut self,
        ticket: AcquireTicket,
        result: BackendResult<SourceHandle>,
    ) {
        if let Err(err) = self.session.finish_acquire(ticket, result) {
            warn!(error = %err, "Camera unavailable; switch direction to retry");
        }
    }

    /// Run the backend request off the event loop and post the result back
    fn spawn_acquire(&self, ticket: AcquireTicket) {
        let backend = Arc::clone(self.session.backend());
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = CaptureSession::run_acquire(Arc::clone(&backend), ticket).await;
            if let Err(SendError(Message::SourceAcquired {
                result: Ok(handle), ..
            })) = sender.send(Message::SourceAcquired { ticket, result })
            {
                // Event loop is gone; nobody else will release this
                info!(id = handle.id(), "Releasing source acquired after shutdown");
                backend.release(handle);
            }
        });
    }
}
