//! Change notifications for entity caches.
//!
//! A cache emits one [`ChangeEvent`] after every successful write. Events carry
//! only the kind that changed; subscribers re-read the cache themselves.

use crate::entity::EntityKind;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

/// Buffered events per subscriber before older ones are dropped.
const CHANNEL_CAPACITY: usize = 64;

/// "Entities of `kind` changed, re-read them."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeEvent {
    pub kind: EntityKind,
}

/// Process-wide publisher. Cloning shares the same channel.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ChangeEvent>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }
}

impl ChangeNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It receives every event emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Announce that `kind` changed.
    pub fn notify(&self, kind: EntityKind) {
        match self.sender.send(ChangeEvent { kind }) {
            Ok(receivers) => debug!(%kind, receivers, "Change notification sent"),
            Err(_) => debug!(%kind, "Change notification dropped, no subscribers"),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Receiving half of a [`ChangeNotifier`] registration.
#[derive(Debug)]
pub struct ChangeSubscription {
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl ChangeSubscription {
    /// Wait for the next event. `None` once every notifier is gone.
    ///
    /// A subscriber that fell behind skips the events it missed; since events
    /// carry no payload, the next one still tells it to re-read.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Change subscriber lagged behind");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-delivered event, without waiting.
    pub fn try_recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Change subscriber lagged behind");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain pending events, keeping only those for `kind`.
    pub fn drain_kind(&mut self, kind: EntityKind) -> Vec<ChangeEvent> {
        std::iter::from_fn(|| self.try_recv())
            .filter(|event| event.kind == kind)
            .collect()
    }
}
