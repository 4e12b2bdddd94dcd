//! # Widget Registry
//!
//! The default [`ChildMaterializer`]: looks up each descriptor's `name` and
//! lets the registered factory build its node. Only one level is built; a
//! `widgets` list inside a child's config is ignored.

use std::collections::HashMap;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::ui::component::{ChildDescriptor, ChildMaterializer, WidgetError};
use crate::ui::dom::{Document, NodeId};

/// Builds one detached node from a child's config.
pub type WidgetFactory = fn(&mut Document, &ChildDescriptor) -> Result<NodeId, WidgetError>;

pub const MENU_ITEM: &str = "MenuItem";
pub const MENU_SEPARATOR: &str = "MenuSeparator";

/// Attribute holding the topic a node publishes when clicked.
pub const PUBLISH_TOPIC_ATTR: &str = "data-publish-topic";
/// Attribute holding the JSON payload published with [`PUBLISH_TOPIC_ATTR`].
pub const PUBLISH_PAYLOAD_ATTR: &str = "data-publish-payload";

pub struct WidgetRegistry {
    factories: HashMap<String, WidgetFactory>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(MENU_ITEM, menu_item);
        registry.register(MENU_SEPARATOR, menu_separator);
        registry
    }
}

impl WidgetRegistry {
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` under `name`, replacing any earlier one.
    pub fn register(&mut self, name: &str, factory: WidgetFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn knows(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl ChildMaterializer for WidgetRegistry {
    fn create_children(
        &self,
        document: &mut Document,
        widgets: &[ChildDescriptor],
        target: NodeId,
    ) -> Result<Vec<NodeId>, WidgetError> {
        // Build every node detached first so any failure leaves the target untouched.
        let mut created = Vec::with_capacity(widgets.len());
        for descriptor in widgets {
            let factory = self
                .factories
                .get(&descriptor.name)
                .ok_or_else(|| WidgetError::UnknownWidgetType(descriptor.name.clone()))?;
            if descriptor.config.get("widgets").is_some() {
                warn!(
                    "{} declares nested widgets; only one level is built",
                    descriptor.name
                );
            }
            let node = factory(document, descriptor)?;
            if let Some(id) = descriptor.config.get("id").and_then(Value::as_str) {
                document.set_attribute(node, "id", id)?;
            }
            created.push(node);
        }
        for &node in &created {
            document.append_child(target, node)?;
        }
        debug!("Materialized {} child widget(s)", created.len());
        Ok(created)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MenuItemConfig {
    label: String,
    #[serde(default)]
    publish_topic: Option<String>,
    #[serde(default)]
    publish_payload: Option<Value>,
}

fn menu_item(document: &mut Document, descriptor: &ChildDescriptor) -> Result<NodeId, WidgetError> {
    let config = MenuItemConfig::deserialize(&descriptor.config).map_err(|e| {
        WidgetError::InvalidWidgetConfig {
            name: descriptor.name.clone(),
            message: e.to_string(),
        }
    })?;

    let node = document.create_element("li");
    document.add_class(node, "mdl-menu__item")?;
    document.set_text(node, &config.label)?;
    if let Some(topic) = &config.publish_topic {
        document.set_attribute(node, PUBLISH_TOPIC_ATTR, topic)?;
        let payload = config.publish_payload.unwrap_or(Value::Object(Default::default()));
        document.set_attribute(node, PUBLISH_PAYLOAD_ATTR, &payload.to_string())?;
    }
    Ok(node)
}

fn menu_separator(document: &mut Document, _: &ChildDescriptor) -> Result<NodeId, WidgetError> {
    let node = document.create_element("li");
    document.add_class(node, "mdl-menu__item--full-bleed-divider")?;
    Ok(node)
}
