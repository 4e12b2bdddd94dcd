//! # Page
//!
//! Owns the document and the widgets placed in it, and is the one place that
//! fires attachment notifications. Each widget is notified once, the first
//! time its root node is connected. Widgets are tracked by root node, so two
//! widgets that share an id are still notified separately.

use std::collections::HashSet;

use log::{debug, warn};
use serde_json::Value;

use super::component::Widget;
use super::components::registry::{PUBLISH_PAYLOAD_ATTR, PUBLISH_TOPIC_ATTR};
use super::dom::{Document, DomError, NodeId};
use crate::core::bus::{Delivery, LocalBus, MessageBus};

pub struct Page {
    document: Document,
    widgets: Vec<Box<dyn Widget>>,
    notified: HashSet<NodeId>,
    bus: Option<LocalBus>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            widgets: Vec::new(),
            notified: HashSet::new(),
            bus: None,
        }
    }

    pub fn with_bus(mut self, bus: LocalBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// For building widgets and markup before they are placed.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn widget(&self, id: &str) -> Option<&dyn Widget> {
        self.widgets.iter().find(|w| w.id() == id).map(|w| &**w)
    }

    /// Append `widget`'s root under `parent` and take ownership of it.
    pub fn mount(&mut self, widget: Box<dyn Widget>, parent: NodeId) -> Result<(), DomError> {
        self.document.append_child(parent, widget.dom_node())?;
        debug!("Mounted {}", widget.id());
        self.widgets.push(widget);
        self.notify_attached();
        Ok(())
    }

    /// Append an arbitrary subtree under `parent`; any widget roots inside it
    /// that became connected are notified.
    pub fn attach(&mut self, node: NodeId, parent: NodeId) -> Result<(), DomError> {
        self.document.append_child(parent, node)?;
        self.notify_attached();
        Ok(())
    }

    fn notify_attached(&mut self) {
        for widget in &mut self.widgets {
            let root = widget.dom_node();
            if self.notified.contains(&root) {
                continue;
            }
            if self.document.is_connected(root) {
                self.notified.insert(root);
                widget.on_added_to_document(&mut self.document);
            }
        }
    }

    /// Simulate a click: publish the node's topic and payload, if it has one.
    pub fn click(&self, node: NodeId) -> Option<Delivery> {
        let topic = self.document.attribute(node, PUBLISH_TOPIC_ATTR)?;
        let Some(bus) = &self.bus else {
            warn!("Clicked node publishes {} but the page has no bus", topic);
            return None;
        };
        let payload = match self.document.attribute(node, PUBLISH_PAYLOAD_ATTR) {
            Some(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Ignoring click: payload for {} is not JSON: {}", topic, e);
                    return None;
                }
            },
            None => Value::Object(Default::default()),
        };
        Some(bus.publish(topic, &payload))
    }

    /// Markup of the whole body.
    pub fn render(&self) -> String {
        self.document.outer_html(self.document.body())
    }
}
