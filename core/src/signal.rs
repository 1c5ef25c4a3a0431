//! One-shot signals
//!
//! A [`Signal`] moves from `pending` to `fired` exactly once and never back.
//! Any number of observers can check it without blocking (render thread) or
//! await it (tokio tasks).

use std::sync::Arc;

use tokio::sync::watch;

/// Single-fire broadcast flag
#[derive(Debug, Clone)]
pub struct Signal {
    name: &'static str,
    tx: Arc<watch::Sender<bool>>,
}

impl Signal {
    pub fn new(name: &'static str) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            name,
            tx: Arc::new(tx),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fire the signal. Returns `true` only for the call that made the transition.
    pub fn fire(&self) -> bool {
        let fired = self.tx.send_if_modified(|state| {
            if *state {
                false
            } else {
                *state = true;
                true
            }
        });
        if fired {
            tracing::debug!(signal = self.name, "signal fired");
        }
        fired
    }

    /// Non-blocking check
    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the signal has fired. Returns immediately if it already has.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|fired| *fired).await;
    }
}
