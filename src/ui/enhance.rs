//! Default enhancement hook.
//!
//! Mirrors what a component-upgrade library does to server-rendered markup:
//! every `mdl-js-*` node in the subtree gets a `data-upgraded` list of the
//! behaviours attached to it plus the `is-upgraded` class. A node that
//! already carries `data-upgraded` is left alone, so upgrading a container
//! twice changes nothing.

use log::debug;

use super::component::{EnhancementHook, WidgetError};
use super::dom::{Document, NodeId};

const JS_CLASS_PREFIX: &str = "mdl-js-";
const UPGRADED_ATTR: &str = "data-upgraded";
const UPGRADED_CLASS: &str = "is-upgraded";

#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentUpgrader;

impl ComponentUpgrader {
    /// Behaviour names for a node, e.g. `mdl-js-ripple-effect` → `MaterialRippleEffect`.
    fn behaviours(document: &Document, node: NodeId) -> Vec<String> {
        document
            .element(node)
            .map(|e| {
                e.classes
                    .iter()
                    .filter_map(|c| c.strip_prefix(JS_CLASS_PREFIX))
                    .map(behaviour_name)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn behaviour_name(suffix: &str) -> String {
    let mut name = String::from("Material");
    for part in suffix.split('-') {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

impl EnhancementHook for ComponentUpgrader {
    fn upgrade_element(&self, document: &mut Document, node: NodeId) -> Result<(), WidgetError> {
        let mut upgraded = 0;
        for target in document.descendants(node) {
            if document.attribute(target, UPGRADED_ATTR).is_some() {
                continue;
            }
            let behaviours = Self::behaviours(document, target);
            if behaviours.is_empty() {
                continue;
            }
            document.set_attribute(target, UPGRADED_ATTR, &format!(",{}", behaviours.join(",")))?;
            document.add_class(target, UPGRADED_CLASS)?;
            upgraded += 1;
        }
        debug!("Upgraded {} node(s) under {:?}", upgraded, node);
        Ok(())
    }
}
