//! # Deferred Composite
//!
//! A widget whose children are only built once its root node is part of the
//! document, so children that may never be shown are never constructed.
//!
//! ## Lifecycle
//!
//! ```text
//! Unattached
//!    │ on_added_to_document (root connected)
//!    ▼
//! AttachedPendingChildren ── container inserted right after the root node
//!    │ create_children(widgets, container)
//!    ▼
//! ChildrenMaterialized
//!    │ upgrade_element(container)
//!    ▼
//! Enhanced
//! ```
//!
//! With `create_children_immediately`, children are built into the root node
//! at construction and the attachment transition never runs.
//!
//! The whole sequence runs inside one call; nothing can observe a
//! half-built container.

use std::rc::Rc;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::ui::component::{
    ChildDescriptor, ChildMaterializer, EnhancementHook, Widget, WidgetError, generate_id,
};
use crate::ui::dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unattached,
    AttachedPendingChildren,
    ChildrenMaterialized,
    Enhanced,
}

/// The node the deferred children are placed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerSpec {
    pub tag: String,
    pub classes: Vec<String>,
    /// Set `for=<owner id>` on the container.
    pub label_for_owner: bool,
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            classes: Vec::new(),
            label_for_owner: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompositeConfig {
    pub id: Option<String>,
    pub create_children_immediately: bool,
    pub widgets: Vec<ChildDescriptor>,
    pub root_tag: String,
    pub label: Option<String>,
    pub container: ContainerSpec,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            id: None,
            create_children_immediately: false,
            widgets: Vec::new(),
            root_tag: "div".to_string(),
            label: None,
            container: ContainerSpec::default(),
        }
    }
}

/// Injected collaborators. Either may be absent; the matching step is then
/// skipped and logged.
#[derive(Clone, Default)]
pub struct Collaborators {
    pub materializer: Option<Rc<dyn ChildMaterializer>>,
    pub enhancer: Option<Rc<dyn EnhancementHook>>,
}

pub struct DeferredComposite {
    id: String,
    dom_node: NodeId,
    config: CompositeConfig,
    collaborators: Collaborators,
    state: LifecycleState,
    container: Option<NodeId>,
    children: Vec<NodeId>,
    last_error: Option<WidgetError>,
}

impl DeferredComposite {
    /// Create the root node (detached). Builds the children right away when
    /// `create_children_immediately` is set.
    pub fn new(document: &mut Document, config: CompositeConfig, collaborators: Collaborators) -> Self {
        let id = config.id.clone().unwrap_or_else(|| generate_id("composite"));
        let dom_node = document.create_element(&config.root_tag);
        if let Ok(root) = document.element_mut(dom_node) {
            root.attributes.insert("id".to_string(), id.clone());
            root.text = config.label.clone();
        }

        let mut widget = Self {
            id,
            dom_node,
            config,
            collaborators,
            state: LifecycleState::Unattached,
            container: None,
            children: Vec::new(),
            last_error: None,
        };
        if widget.config.create_children_immediately {
            widget.create_children_now(document);
        }
        widget
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn widgets(&self) -> &[ChildDescriptor] {
        &self.config.widgets
    }

    /// The most recent failure or skipped step, if any.
    pub fn last_error(&self) -> Option<&WidgetError> {
        self.last_error.as_ref()
    }

    /// Remove the container and the root node from the document.
    pub fn destroy(self, document: &mut Document) {
        if let Some(container) = self.container
            && container != self.dom_node
        {
            let _ = document.remove(container);
        }
        let _ = document.remove(self.dom_node);
        debug!("Destroyed {}", self.id);
    }

    fn create_children_now(&mut self, document: &mut Document) {
        self.container = Some(self.dom_node);
        match self.materialize(document, self.dom_node) {
            Ok(children) => {
                self.children = children;
                self.state = LifecycleState::ChildrenMaterialized;
            }
            Err(e) => self.record(e),
        }
    }

    fn render_deferred(&mut self, document: &mut Document) -> Result<(), WidgetError> {
        self.state = LifecycleState::AttachedPendingChildren;

        let container = self.build_container(document);
        document.insert_after(self.dom_node, container)?;
        self.container = Some(container);

        self.children = self.materialize(document, container)?;
        self.state = LifecycleState::ChildrenMaterialized;

        match self.collaborators.enhancer.clone() {
            Some(enhancer) => {
                enhancer.upgrade_element(document, container)?;
                self.state = LifecycleState::Enhanced;
            }
            None => self.record(WidgetError::MissingCollaborator("enhancement hook")),
        }
        info!(
            "{} rendered {} deferred child(ren), state {:?}",
            self.id,
            self.children.len(),
            self.state
        );
        Ok(())
    }

    fn build_container(&self, document: &mut Document) -> NodeId {
        let spec = &self.config.container;
        let container = document.create_element(&spec.tag);
        if let Ok(element) = document.element_mut(container) {
            element.classes = spec.classes.clone();
            if spec.label_for_owner {
                element.attributes.insert("for".to_string(), self.id.clone());
            }
        }
        container
    }

    fn materialize(
        &mut self,
        document: &mut Document,
        target: NodeId,
    ) -> Result<Vec<NodeId>, WidgetError> {
        match self.collaborators.materializer.clone() {
            Some(materializer) => {
                materializer.create_children(document, &self.config.widgets, target)
            }
            None => {
                self.record(WidgetError::MissingCollaborator("child materializer"));
                Ok(Vec::new())
            }
        }
    }

    fn record(&mut self, e: WidgetError) {
        match e {
            WidgetError::MissingCollaborator(_) => warn!("{}: {}, step skipped", self.id, e),
            _ => error!("{} could not finish rendering: {}", self.id, e),
        }
        self.last_error = Some(e);
    }
}

impl Widget for DeferredComposite {
    fn id(&self) -> &str {
        &self.id
    }

    fn dom_node(&self) -> NodeId {
        self.dom_node
    }

    fn on_added_to_document(&mut self, document: &mut Document) {
        if self.state != LifecycleState::Unattached {
            if self.config.create_children_immediately {
                debug!("{} built its children at construction, nothing deferred", self.id);
            } else {
                warn!(
                    "{} already handled its attachment (state {:?}), ignoring",
                    self.id, self.state
                );
            }
            return;
        }
        if self.config.create_children_immediately {
            // Immediate construction failed; it is not retried here.
            debug!("{} does not defer its children", self.id);
            return;
        }
        if !document.is_connected(self.dom_node) {
            warn!("{} notified of attachment while not in the document", self.id);
            return;
        }
        if let Err(e) = self.render_deferred(document) {
            self.record(e);
        }
    }
}
