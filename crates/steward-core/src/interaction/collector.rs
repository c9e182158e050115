//! Bounded-lifetime, filtered subscription to the interaction hub.
//!
//! A collector is owned by exactly one session or prompt flow. Dropping
//! it releases the subscription; once the deadline passes, `next()`
//! returns `None` and never an error, so a lapsed timeout reads as a
//! clean end-of-stream to the caller.

use std::time::Duration;

use steward_types::interaction::Interaction;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::warn;

type Filter = Box<dyn Fn(&Interaction) -> bool + Send>;

/// Filtered event stream with a fixed deadline.
pub struct Collector {
    receiver: broadcast::Receiver<Interaction>,
    filter: Filter,
    deadline: Instant,
}

impl Collector {
    pub(super) fn new(
        receiver: broadcast::Receiver<Interaction>,
        ttl: Duration,
        filter: impl Fn(&Interaction) -> bool + Send + 'static,
    ) -> Self {
        Self {
            receiver,
            filter: Box::new(filter),
            deadline: Instant::now() + ttl,
        }
    }

    /// Wait for the next event accepted by the filter.
    ///
    /// Returns `None` when the deadline lapses or the hub is dropped.
    /// Non-matching events are skipped without consuming the deadline.
    pub async fn next(&mut self) -> Option<Interaction> {
        loop {
            match tokio::time::timeout_at(self.deadline, self.receiver.recv()).await {
                Err(_) => return None,
                Ok(Err(broadcast::error::RecvError::Closed)) => return None,
                Ok(Err(broadcast::error::RecvError::Lagged(skipped))) => {
                    warn!(skipped, "interaction collector lagged behind the hub");
                }
                Ok(Ok(event)) => {
                    if (self.filter)(&event) {
                        return Some(event);
                    }
                }
            }
        }
    }

    /// Whether the deadline has already passed.
    pub fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("deadline", &self.deadline)
            .finish()
    }
}
