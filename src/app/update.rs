// SPDX-License-Identifier: GPL-3.0-only

//! Message dispatch

use super::state::{AppModel, Message};

impl AppModel {
    /// Apply one message to the model
    ///
    /// Background work (acquisition, saving, timers) is spawned on the tokio
    /// runtime and reports back through the model's message sender.
    pub fn update(&mut self, message: Message) {
        match message {
            // ===== Camera Control =====
            Message::Start => self.handle_start(),
            Message::SwitchCamera => self.handle_switch_camera(),
            Message::SourceAcquired { ticket, result } => {
                self.handle_source_acquired(ticket, result)
            }

            // ===== Filters =====
            Message::SelectFilter(filter) => self.session.select_filter(filter),

            // ===== Capture Operations =====
            Message::Capture => self.handle_capture(),
            Message::ClearFlash(token) => {
                if self.flash_timer.expire(token) {
                    self.flash_active = false;
                }
            }
            Message::ClearCapturing(token) => {
                if self.capturing_timer.expire(token) {
                    self.is_capturing = false;
                }
            }

            // ===== Gallery =====
            Message::DeletePhoto(id) => self.handle_delete_photo(id),
            Message::DownloadPhoto(id) => self.handle_download_photo(id),
            Message::PhotoSaved(result) => self.handle_photo_saved(result),

            // ===== System =====
            Message::Shutdown => self.shutdown(),
        }
    }
}
