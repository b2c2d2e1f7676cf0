// SPDX-License-Identifier: GPL-3.0-only

//! System handlers

use crate::app::state::AppModel;
use tracing::info;

impl AppModel {
    /// Release the camera, drop pending cosmetic state and stop the event loop
    pub fn shutdown(&mut self) {
        info!("Shutting down capture session");
        self.session.close();
        self.flash_timer.cancel();
        self.capturing_timer.cancel();
        self.flash_active = false;
        self.is_capturing = false;
        self.running = false;
    }
}
