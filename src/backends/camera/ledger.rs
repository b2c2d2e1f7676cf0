// SPDX-License-Identifier: GPL-3.0-only

//! Live-handle bookkeeping shared by the bundled backends

use super::types::{FacingMode, SourceHandle};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// Snapshot of a backend's handle counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Successful acquisitions
    pub acquired: u64,
    /// Releases of live handles
    pub released: u64,
    /// Handles acquired and not yet released
    pub live: usize,
}

#[derive(Default)]
struct LedgerState {
    next_id: u64,
    live: HashSet<u64>,
    acquired: u64,
    released: u64,
}

/// Mints handle ids and tracks which ones are still live
#[derive(Default)]
pub struct HandleLedger {
    state: Mutex<LedgerState>,
}

impl HandleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new live handle
    pub fn open(&self, facing: FacingMode, width: u32, height: u32) -> SourceHandle {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.next_id += 1;
        let id = state.next_id;
        state.live.insert(id);
        state.acquired += 1;
        debug!(id, %facing, width, height, "Source handle opened");
        SourceHandle::new(id, facing, width, height)
    }

    /// Close a handle; returns false if it was not live
    pub fn close(&self, handle: SourceHandle) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.live.remove(&handle.id()) {
            state.released += 1;
            debug!(id = handle.id(), "Source handle closed");
            true
        } else {
            warn!(id = handle.id(), "Release of a handle this backend does not own");
            false
        }
    }

    pub fn is_live(&self, handle: &SourceHandle) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .live
            .contains(&handle.id())
    }

    pub fn stats(&self) -> SourceStats {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        SourceStats {
            acquired: state.acquired,
            released: state.released,
            live: state.live.len(),
        }
    }
}
