//! # Navigation Service
//!
//! Wires a [`NavigationResolver`] and a [`BrowsingContext`] to the bus.
//!
//! ```text
//! publish(NAVIGATE_TO_PAGE, payload)
//!        │
//!        ▼
//! NavigationService ── from_payload ── resolve ── perform ──▶ BrowsingContext
//!        │
//!        └── on error: log + record, no navigation
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error};

use super::browser::BrowsingContext;
use super::bus::{Delivery, MessageBus, Payload, SubscriptionId};
use super::error::NavigationError;
use super::request::NavigationRequest;
use super::resolver::NavigationResolver;
use super::vocabulary::{NavigationVocabulary, Topic};

pub struct NavigationService {
    subscriptions: Vec<SubscriptionId>,
    failures: Rc<RefCell<Vec<NavigationError>>>,
}

impl NavigationService {
    /// Subscribe to the three navigation topics, named by `vocabulary`.
    pub fn subscribe(
        bus: &impl MessageBus,
        vocabulary: &impl NavigationVocabulary,
        resolver: NavigationResolver,
        browser: Rc<RefCell<dyn BrowsingContext>>,
    ) -> Self {
        let resolver = Rc::new(resolver);
        let failures = Rc::new(RefCell::new(Vec::new()));

        let subscriptions = Topic::ALL
            .into_iter()
            .map(|topic| {
                let resolver = Rc::clone(&resolver);
                let browser = Rc::clone(&browser);
                let failures = Rc::clone(&failures);
                let name = vocabulary.topic_name(topic).to_string();
                bus.subscribe(
                    &name,
                    Box::new(move |payload: &Payload| {
                        let current = browser.borrow().current_address();
                        match resolver.resolve_payload(topic, payload, &current) {
                            Ok(action) => browser.borrow_mut().perform(action),
                            Err(e) => {
                                error!("Navigation request on {} not performed: {}", topic, e);
                                failures.borrow_mut().push(e);
                            }
                        }
                    }),
                )
            })
            .collect();

        Self {
            subscriptions,
            failures,
        }
    }

    /// Requests that failed to resolve, oldest first.
    pub fn failures(&self) -> Vec<NavigationError> {
        self.failures.borrow().clone()
    }

    /// Drain the recorded failures, oldest first.
    pub fn take_failures(&self) -> Vec<NavigationError> {
        std::mem::take(&mut *self.failures.borrow_mut())
    }

    pub fn unsubscribe_all(&mut self, bus: &impl MessageBus) {
        for id in self.subscriptions.drain(..) {
            bus.unsubscribe(id);
        }
    }
}

/// Publish `request` on the topic `vocabulary` uses for it.
pub fn publish_navigation(
    bus: &impl MessageBus,
    vocabulary: &impl NavigationVocabulary,
    request: &NavigationRequest,
) -> Delivery {
    let topic = vocabulary.topic_name(request.topic);
    let delivery = bus.publish(topic, &request.to_payload());
    if delivery.is_lost() {
        debug!("Navigation request on {} had no subscriber", topic);
    }
    delivery
}
