//! # Menu
//!
//! A button whose menu items are only built once the button is on the page.
//! The items go into a `ul` placed right after the button and labelled
//! `for` it, which is then handed to the enhancement hook.

use serde::{Deserialize, Serialize};

use super::deferred::{Collaborators, CompositeConfig, ContainerSpec, DeferredComposite};
use crate::ui::component::{ChildDescriptor, generate_id};
use crate::ui::dom::Document;

pub const MENU_CLASSES: [&str; 3] = ["mdl-menu", "mdl-js-menu", "mdl-js-ripple-effect"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuConfig {
    pub id: Option<String>,
    pub label: Option<String>,
    pub create_children_immediately: bool,
    pub widgets: Vec<ChildDescriptor>,
}

impl From<MenuConfig> for CompositeConfig {
    fn from(menu: MenuConfig) -> Self {
        CompositeConfig {
            id: Some(menu.id.unwrap_or_else(|| generate_id("menu"))),
            create_children_immediately: menu.create_children_immediately,
            widgets: menu.widgets,
            root_tag: "button".to_string(),
            label: menu.label,
            container: ContainerSpec {
                tag: "ul".to_string(),
                classes: MENU_CLASSES.iter().map(|c| c.to_string()).collect(),
                label_for_owner: true,
            },
        }
    }
}

/// Build a menu widget. Its root button is created detached.
pub fn build_menu(
    document: &mut Document,
    config: MenuConfig,
    collaborators: Collaborators,
) -> DeferredComposite {
    DeferredComposite::new(document, config.into(), collaborators)
}
