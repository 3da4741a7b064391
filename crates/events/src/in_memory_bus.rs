//! In-memory event bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, Weak, mpsc};

use thiserror::Error;

use crate::bus::{EventBus, Subscription, SubscriptionId, Topic};
use crate::event::Event;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    #[error("event bus lock poisoned")]
    Poisoned,
}

#[derive(Debug)]
struct Subscriber<M> {
    id: SubscriptionId,
    topic: Topic,
    sender: mpsc::Sender<M>,
    alive: Weak<()>,
}

/// In-memory pub/sub bus.
///
/// - No IO / no async
/// - Synchronous fan-out inside `publish`
/// - Dropped subscriptions are pruned on every publish, matching or not
#[derive(Debug)]
pub struct InMemoryEventBus<M> {
    subscribers: Mutex<Vec<Subscriber<M>>>,
    next_id: AtomicU64,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered subscriptions (including ones not yet pruned).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|subs| subs.len()).unwrap_or(0)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Event,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut subs = self.subscribers.lock().map_err(|_| InMemoryBusError::Poisoned)?;

        subs.retain(|sub| {
            if sub.alive.strong_count() == 0 {
                return false;
            }
            if !sub.topic.matches(&message) {
                return true;
            }
            sub.sender.send(message.clone()).is_ok()
        });

        tracing::trace!(event_type = message.event_type(), subscribers = subs.len(), "published");
        Ok(())
    }

    fn subscribe(&self, topic: Topic) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));

        // A poisoned lock still hands back a subscription; it just never
        // receives anything.
        let subscription = Subscription::new(id, topic, rx);
        match self.subscribers.lock() {
            Ok(mut subs) => subs.push(Subscriber {
                id,
                topic,
                sender: tx,
                alive: subscription.liveness(),
            }),
            Err(_) => tracing::warn!(?topic, "event bus lock poisoned; subscription is inert"),
        }

        subscription
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let Ok(mut subs) = self.subscribers.lock() else {
            return false;
        };
        let before = subs.len();
        subs.retain(|sub| sub.id != id);
        subs.len() != before
    }
}
