// SPDX-License-Identifier: GPL-3.0-only

//! Cancellable delayed messages for cosmetic UI state

use super::state::Message;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

/// One-shot timer that posts a message back to the event loop
///
/// Re-arming aborts the pending timer. Each arming carries a token, and
/// [`CosmeticTimer::expire`] only accepts the latest one, so a message that
/// was already queued before a re-arm is recognised as stale.
#[derive(Debug, Default)]
pub struct CosmeticTimer {
    handle: Option<AbortHandle>,
    token: u64,
}

impl CosmeticTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post `make(token)` after `delay`, replacing any pending timer
    pub fn arm(
        &mut self,
        delay: Duration,
        sender: &UnboundedSender<Message>,
        make: impl FnOnce(u64) -> Message + Send + 'static,
    ) {
        self.cancel();
        self.token += 1;
        let token = self.token;
        let sender = sender.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session ended
            let _ = sender.send(make(token));
        });
        self.handle = Some(task.abort_handle());
    }

    /// Abort the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Accept a fired timer; false for tokens from a replaced arming
    pub fn expire(&mut self, token: u64) -> bool {
        if token != self.token || self.handle.is_none() {
            return false;
        }
        self.handle = None;
        true
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for CosmeticTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
