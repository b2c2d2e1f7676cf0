// SPDX-License-Identifier: GPL-3.0-only

//! Gallery handlers

use crate::app::state::{AppModel, Message};
use crate::errors::PhotoError;
use crate::gallery::PhotoId;
use crate::storage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

impl AppModel {
    pub(crate) fn handle_delete_photo(&mut self, id: PhotoId) {
        if self.gallery.remove(id).is_none() {
            warn!(id, "Delete requested for unknown photo");
            return;
        }
        let remaining = self.session.restore_exposure();
        info!(id, remaining, "Photo deleted");
    }

    pub(crate) fn handle_download_photo(&mut self, id: PhotoId) {
        let Some(photo) = self.gallery.get(id).cloned() else {
            warn!(id, "{}", PhotoError::NotFound(id));
            return;
        };

        self.pending_saves += 1;
        let sink = Arc::clone(&self.sink);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = storage::save_photo(sink, photo).await;
            let _ = sender.send(Message::PhotoSaved(result));
        });
    }

    pub(crate) fn handle_photo_saved(&mut self, result: Result<PathBuf, PhotoError>) {
        self.pending_saves = self.pending_saves.saturating_sub(1);
        match result {
            Ok(path) => {
                info!(path = %path.display(), "Photo downloaded");
                self.saved.push(path);
            }
            Err(err) => {
                error!(error = %err, "Failed to download photo");
                self.save_errors.push(err);
            }
        }
    }
}
