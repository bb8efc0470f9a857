//! Synchronous fan-out of poll results.

use crate::snapshot::Snapshot;

/// Callback invoked with each poll result (`None` = status unknown).
pub type SubscriberFn = Box<dyn FnMut(Option<&Snapshot>) + Send + 'static>;

/// Observer list for status updates.
///
/// Subscribers run on the publishing thread, in subscription order.
#[derive(Default)]
pub struct StatusBus {
    subscribers: Vec<SubscriberFn>,
}

impl StatusBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber.
    pub fn subscribe(&mut self, subscriber: impl FnMut(Option<&Snapshot>) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Delivers one result to every subscriber.
    pub fn publish(&mut self, status: Option<&Snapshot>) {
        tracing::trace!(
            subscribers = self.subscribers.len(),
            known = status.is_some(),
            "publishing status"
        );
        for subscriber in &mut self.subscribers {
            subscriber(status);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for StatusBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
