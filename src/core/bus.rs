//! # Message Bus
//!
//! Topic-based publish/subscribe between widgets and services.
//!
//! Delivery contract, for every implementation:
//!
//! - **Synchronous.** `publish` returns after every matching handler ran.
//! - **Ordered.** Handlers run in subscription order.
//! - **At most once.** Each subscriber sees a given publish at most once.
//!   There is no retry, no queue and no backpressure.
//! - **Lossy.** Publishing to a topic nobody listens to yields
//!   [`Delivery::Lost`]. That is an outcome, not an error.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use serde_json::Value;

pub type Payload = Value;

pub type Handler = Box<dyn FnMut(&Payload)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Number of handlers that ran.
    Delivered(usize),
    Lost,
}

impl Delivery {
    pub fn is_lost(self) -> bool {
        matches!(self, Delivery::Lost)
    }
}

pub trait MessageBus {
    fn publish(&self, topic: &str, payload: &Payload) -> Delivery;

    fn subscribe(&self, topic: &str, handler: Handler) -> SubscriptionId;

    /// Returns false if `id` was not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

struct Subscription {
    id: SubscriptionId,
    topic: String,
    handler: Rc<RefCell<Handler>>,
}

#[derive(Default)]
struct BusInner {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

/// Single-threaded in-process bus. Clones share the same subscriptions.
#[derive(Clone, Default)]
pub struct LocalBus {
    inner: Rc<RefCell<BusInner>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.inner
            .borrow()
            .subscriptions
            .iter()
            .filter(|s| s.topic == topic)
            .count()
    }
}

impl MessageBus for LocalBus {
    fn publish(&self, topic: &str, payload: &Payload) -> Delivery {
        // Snapshot the handlers so they can subscribe or publish themselves.
        let handlers: Vec<(SubscriptionId, Rc<RefCell<Handler>>)> = self
            .inner
            .borrow()
            .subscriptions
            .iter()
            .filter(|s| s.topic == topic)
            .map(|s| (s.id, Rc::clone(&s.handler)))
            .collect();

        if handlers.is_empty() {
            debug!("No subscribers for topic {}, publication lost", topic);
            return Delivery::Lost;
        }

        let mut delivered = 0;
        for (id, handler) in handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (*handler)(payload);
                    delivered += 1;
                }
                Err(_) => {
                    warn!(
                        "Subscription {:?} re-entered by its own publication on {}, skipped",
                        id, topic
                    );
                }
            }
        }

        if delivered == 0 {
            Delivery::Lost
        } else {
            Delivery::Delivered(delivered)
        }
    }

    fn subscribe(&self, topic: &str, handler: Handler) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscriptions.push(Subscription {
            id,
            topic: topic.to_string(),
            handler: Rc::new(RefCell::new(handler)),
        });
        debug!("Subscribed {:?} to {}", id, topic);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.subscriptions.len();
        inner.subscriptions.retain(|s| s.id != id);
        inner.subscriptions.len() != before
    }
}
