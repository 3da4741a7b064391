//! Publish/subscribe abstraction (mechanics only).
//!
//! Subscribers pick a [`Topic`] and receive matching events on their own
//! channel. Dropping a [`Subscription`] is enough to stop receiving; the bus
//! prunes dropped subscriptions on the next publish, whatever their topic. [`EventBus::unsubscribe`] removes
//! one eagerly.

use std::sync::{Arc, Weak};
use std::sync::mpsc::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crate::event::Event;

/// Which events a subscriber wants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    All,
    /// Only events whose `event_type()` equals this string.
    EventType(&'static str),
}

impl Topic {
    pub fn matches<M: Event>(&self, message: &M) -> bool {
        match self {
            Topic::All => true,
            Topic::EventType(t) => message.event_type() == *t,
        }
    }
}

/// Token returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = bus.subscribe(Topic::EventType("records.cmr_delivery.inserted"));
///
/// loop {
///     match subscription.recv_timeout(Duration::from_secs(1)) {
///         Ok(event) => refresh_dashboard(event),
///         Err(RecvTimeoutError::Timeout) => continue,
///         Err(RecvTimeoutError::Disconnected) => break,
///     }
/// }
/// ```
///
/// Messages arrive in publish order. A subscription is meant for one consumer
/// thread.
#[derive(Debug)]
pub struct Subscription<M> {
    id: SubscriptionId,
    topic: Topic,
    receiver: Receiver<M>,
    alive: Arc<()>,
}

impl<M> Subscription<M> {
    pub fn new(id: SubscriptionId, topic: Topic, receiver: Receiver<M>) -> Self {
        Self {
            id,
            topic,
            receiver,
            alive: Arc::new(()),
        }
    }

    /// Handle that stops upgrading once this subscription is dropped.
    pub fn liveness(&self) -> Weak<()> {
        Arc::downgrade(&self.alive)
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic pub/sub bus.
///
/// `publish` fans a message out to every live subscription whose topic
/// matches. Implementations must be safe to share across threads.
pub trait EventBus<M: Event>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self, topic: Topic) -> Subscription<M>;

    /// Returns `false` if the id was unknown (already removed or dropped).
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

impl<M, B> EventBus<M> for Arc<B>
where
    M: Event,
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self, topic: Topic) -> Subscription<M> {
        (**self).subscribe(topic)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        (**self).unsubscribe(id)
    }
}
