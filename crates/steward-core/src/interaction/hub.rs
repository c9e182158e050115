//! Broadcast hub for inbound interaction events.
//!
//! Built on `tokio::sync::broadcast`, so any number of collectors can
//! listen concurrently. Publishing with no active collectors is a no-op.

use std::time::Duration;

use steward_types::interaction::Interaction;
use tokio::sync::broadcast;

use super::collector::Collector;

/// Buffer size for the interaction broadcast channel.
const HUB_BUFFER: usize = 256;

/// Multi-consumer hub for interaction events.
///
/// Cloning the hub clones the sender, allowing multiple producers and
/// consumers. A collector only sees events published after it was taken.
pub struct InteractionHub {
    sender: broadcast::Sender<Interaction>,
}

impl InteractionHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(HUB_BUFFER);
        Self { sender }
    }

    /// Publish an event to all current collectors.
    ///
    /// If there are no collectors, the event is silently dropped.
    pub fn publish(&self, event: Interaction) {
        let _ = self.sender.send(event);
    }

    /// Take a bounded-lifetime subscription matching `filter`.
    ///
    /// The collector yields only events the filter accepts and returns
    /// `None` once `ttl` has elapsed.
    pub fn collect(
        &self,
        ttl: Duration,
        filter: impl Fn(&Interaction) -> bool + Send + 'static,
    ) -> Collector {
        Collector::new(self.sender.subscribe(), ttl, filter)
    }
}

impl Default for InteractionHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InteractionHub {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl std::fmt::Debug for InteractionHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionHub")
            .field("collector_count", &self.sender.receiver_count())
            .finish()
    }
}
