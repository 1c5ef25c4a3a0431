//! Most-recent-value slot for the remaining countdown time
//!
//! The ticker publishes into a single slot and never blocks; a slow reader
//! simply sees the latest value ("latest wins"). Values only ever decrease.
//! Buffering depth is one slot: a reader slower than a tick skips the
//! intermediate seconds, which only affects what is displayed.

use tokio::sync::watch;

use crate::duration::DurationSecs;

/// Create a connected sender/receiver pair. Nothing is published yet.
pub fn remaining_channel() -> (RemainingSender, RemainingReceiver) {
    let (tx, rx) = watch::channel(None);
    (
        RemainingSender { tx },
        RemainingReceiver { rx, last: None },
    )
}

/// Publishing half, owned by the countdown ticker
#[derive(Debug)]
pub struct RemainingSender {
    tx: watch::Sender<Option<DurationSecs>>,
}

impl RemainingSender {
    /// Replace the slot contents. Never blocks, even without a reader.
    pub fn publish(&self, remaining: DurationSecs) {
        self.tx.send_replace(Some(remaining));
    }
}

/// Reading half, owned by the render loop
#[derive(Debug)]
pub struct RemainingReceiver {
    rx: watch::Receiver<Option<DurationSecs>>,
    last: Option<DurationSecs>,
}

impl RemainingReceiver {
    /// Non-blocking read. Returns a value only if it differs from the last one
    /// handed out; `None` means nothing new to show this cycle.
    pub fn try_latest(&mut self) -> Option<DurationSecs> {
        let current = *self.rx.borrow_and_update();
        if current.is_some() && current != self.last {
            self.last = current;
            current
        } else {
            None
        }
    }

    /// Wait for the next published value. Returns `None` once the sender is
    /// gone and the final value has been observed.
    pub async fn next(&mut self) -> Option<DurationSecs> {
        loop {
            self.rx.changed().await.ok()?;
            let current = *self.rx.borrow_and_update();
            if current.is_some() && current != self.last {
                self.last = current;
                return current;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_reads_nothing() {
        let (_tx, mut rx) = remaining_channel();
        assert_eq!(rx.try_latest(), None);
    }

    #[test]
    fn latest_value_wins() {
        let (tx, mut rx) = remaining_channel();
        tx.publish(10);
        tx.publish(9);
        tx.publish(8);
        assert_eq!(rx.try_latest(), Some(8));
        assert_eq!(rx.try_latest(), None);
        tx.publish(7);
        assert_eq!(rx.try_latest(), Some(7));
    }

    #[test]
    fn final_value_survives_sender_drop() {
        let (tx, mut rx) = remaining_channel();
        tx.publish(0);
        drop(tx);
        assert_eq!(rx.try_latest(), Some(0));
        assert_eq!(rx.try_latest(), None);
    }

    #[tokio::test]
    async fn next_ends_after_close() {
        let (tx, mut rx) = remaining_channel();
        tx.publish(1);
        assert_eq!(rx.next().await, Some(1));
        tx.publish(0);
        drop(tx);
        assert_eq!(rx.next().await, Some(0));
        assert_eq!(rx.next().await, None);
    }
}
