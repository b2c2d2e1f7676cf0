// SPDX-License-Identifier: GPL-3.0-only

//! Capture operation handlers
//!
//! Handles the shutter and the flash / capturing feedback it triggers.

use crate::app::state::{AppModel, Message};
use crate::pipelines::photo::CaptureBlocked;
use tracing::{debug, error};

impl AppModel {
    // =========================================================================
    // Capture Handlers
    // =========================================================================

    pub(crate) fn handle_capture(&mut self) {
        if self.is_capturing {
            debug!(reason = %CaptureBlocked::Busy, "Capture ignored");
            return;
        }

        let photo = match self.session.capture(&self.engine) {
            Ok(Ok(photo)) => photo,
            Ok(Err(blocked)) => {
                debug!(reason = %blocked, "Capture ignored");
                return;
            }
            Err(err) => {
                error!(error = %err, "Failed to capture photo");
                return;
            }
        };

        debug!(id = photo.id(), total = self.gallery.len() + 1, "Adding photo to gallery");
        self.gallery.add(photo);

        self.flash_active = true;
        self.is_capturing = true;
        self.flash_timer
            .arm(self.config.flash_duration(), &self.sender, Message::ClearFlash);
        self.capturing_timer.arm(
            self.config.capturing_duration(),
            &self.sender,
            Message::ClearCapturing,
        );
    }
}
